//! Resume Renderer — turns structured resume data into a standalone HTML
//! document with embedded CSS.
//!
//! Called twice per optimize request: once with the original achievement
//! order and an empty hidden block (the "default" view), once with the
//! reordered achievements plus the injected ATS keyword block. All
//! user-supplied text is HTML-escaped; the renderer is a pure function of
//! its inputs.

use crate::models::resume::{Experience, Resume, SkillGroup};

const CSS: &str = include_str!("../../templates/resume.css");

/// Display titles for well-known skill categories; anything else falls back
/// to a prettified version of the raw key.
const SKILL_CATEGORY_TITLES: &[(&str, &str)] = &[
    ("fintech", "FinTech & Blockchain"),
    ("programming_languages", "Programming Languages"),
    ("web_technologies", "Frameworks & Cloud"),
    ("leadership", "Leadership & Process"),
];

/// Renders a complete HTML resume. `hidden_block` is the pre-built ATS
/// keyword fragment (already escaped) or an empty string for the default
/// view.
pub fn render_resume(resume: &Resume, hidden_block: &str) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} — Resume</title>\n",
        escape_html(&resume.personal.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n</head>\n<body>\n");

    render_header(&mut html, resume);
    render_summary(&mut html, resume);
    render_experience(&mut html, &resume.experience);
    render_skills(&mut html, resume);
    render_projects(&mut html, resume);
    render_education(&mut html, resume);

    html.push_str(hidden_block);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, resume: &Resume) {
    let personal = &resume.personal;
    html.push_str("<header class=\"header\">\n");
    html.push_str(&format!(
        "<h1 class=\"name\">{}</h1>\n",
        escape_html(&personal.name)
    ));
    html.push_str("<div class=\"contact-info\">\n");
    for field in [
        &personal.email,
        &personal.phone,
        &personal.location,
    ] {
        if !field.is_empty() {
            html.push_str(&format!("<span>{}</span>\n", escape_html(field)));
        }
    }
    if let Some(linkedin) = &personal.linkedin {
        html.push_str(&format!("<span>{}</span>\n", escape_html(linkedin)));
    }
    if let Some(github) = &personal.github {
        html.push_str(&format!("<span>{}</span>\n", escape_html(github)));
    }
    html.push_str("</div>\n</header>\n");
}

fn render_summary(html: &mut String, resume: &Resume) {
    let summary = &resume.summary;
    if summary.headline.is_empty() && summary.bullets.is_empty() {
        return;
    }
    html.push_str("<section class=\"section\">\n<h2 class=\"section-title\">Professional Summary</h2>\n");
    if !summary.headline.is_empty() {
        html.push_str(&format!(
            "<p class=\"summary-text\">{}</p>\n",
            escape_html(&summary.headline)
        ));
    }
    for bullet in &summary.bullets {
        // "Label: detail" bullets render the label emphasized.
        match bullet.split_once(':') {
            Some((label, detail)) => html.push_str(&format!(
                "<div class=\"highlight-item\"><span class=\"highlight-label\">{}</span>{}</div>\n",
                escape_html(label),
                escape_html(detail.trim())
            )),
            None => html.push_str(&format!(
                "<div class=\"highlight-item\">{}</div>\n",
                escape_html(bullet)
            )),
        }
    }
    html.push_str("</section>\n");
}

fn render_experience(html: &mut String, experience: &[Experience]) {
    if experience.is_empty() {
        return;
    }
    html.push_str(
        "<section class=\"section\">\n<h2 class=\"section-title\">Professional Experience</h2>\n",
    );
    for job in experience {
        html.push_str("<div class=\"job-card\">\n");
        html.push_str(&format!(
            "<h3 class=\"job-title\">{}</h3>\n",
            escape_html(&job.title)
        ));
        html.push_str("<div class=\"company-info\">\n");
        html.push_str(&format!(
            "<span class=\"company-name\">{}</span>\n",
            escape_html(&job.company)
        ));
        if !job.location.is_empty() {
            html.push_str(&format!("<span>{}</span>\n", escape_html(&job.location)));
        }
        if !job.duration.is_empty() {
            html.push_str(&format!("<span>{}</span>\n", escape_html(&job.duration)));
        }
        html.push_str("</div>\n");
        if let Some(description) = &job.description {
            html.push_str(&format!(
                "<div class=\"job-description\">{}</div>\n",
                escape_html(description)
            ));
        }
        if !job.achievements.is_empty() {
            html.push_str("<ul class=\"achievements\">\n");
            for achievement in &job.achievements {
                html.push_str(&format!(
                    "<li class=\"achievement-item\">{}</li>\n",
                    escape_html(&achievement.text)
                ));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
}

fn render_skills(html: &mut String, resume: &Resume) {
    if resume.skills.is_empty() {
        return;
    }
    html.push_str(
        "<section class=\"section\">\n<h2 class=\"section-title\">Technical Skills</h2>\n<div class=\"skills-grid\">\n",
    );
    for (key, group) in &resume.skills {
        html.push_str("<div class=\"skill-category\">\n");
        html.push_str(&format!(
            "<h3 class=\"skill-category-title\">{}</h3>\n",
            escape_html(&category_title(key))
        ));
        html.push_str("<div class=\"skill-tags\">\n");
        for term in group.terms().iter().take(10) {
            html.push_str(&format!(
                "<span class=\"skill-tag\">{}</span>\n",
                escape_html(term)
            ));
        }
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n</section>\n");
}

fn render_projects(html: &mut String, resume: &Resume) {
    if resume.projects.is_empty() {
        return;
    }
    html.push_str("<section class=\"section\">\n<h2 class=\"section-title\">Key Projects</h2>\n");
    for project in &resume.projects {
        html.push_str("<div class=\"project-card\">\n");
        html.push_str(&format!(
            "<h3 class=\"project-title\">{}</h3>\n",
            escape_html(&project.name)
        ));
        if !project.description.is_empty() {
            html.push_str(&format!(
                "<p class=\"project-description\">{}</p>\n",
                escape_html(&project.description)
            ));
        }
        if !project.achievements.is_empty() {
            html.push_str("<ul class=\"project-achievements\">\n");
            for achievement in &project.achievements {
                html.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
}

fn render_education(html: &mut String, resume: &Resume) {
    if resume.education.is_empty() {
        return;
    }
    html.push_str("<section class=\"section\">\n<h2 class=\"section-title\">Education</h2>\n");
    for education in &resume.education {
        html.push_str("<div class=\"education-item\">\n");
        html.push_str(&format!(
            "<div class=\"degree\">{}</div>\n",
            escape_html(&education.degree)
        ));
        html.push_str("<div class=\"school-info\">\n");
        html.push_str(&format!("<span>{}</span>\n", escape_html(&education.school)));
        if !education.duration.is_empty() {
            html.push_str(&format!(
                "<span>{}</span>\n",
                escape_html(&education.duration)
            ));
        }
        html.push_str("</div>\n");
        if let Some(description) = &education.description {
            html.push_str(&format!(
                "<div class=\"education-description\">{}</div>\n",
                escape_html(description)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
}

fn category_title(key: &str) -> String {
    for (known, title) in SKILL_CATEGORY_TITLES {
        if *known == key {
            return (*title).to_string();
        }
    }
    // "cloud_platforms" -> "Cloud Platforms"
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimal HTML entity escaping for user-supplied text.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
