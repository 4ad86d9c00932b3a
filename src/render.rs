use anyhow::Result;
use askama::Template;

use crate::models::CitationRecord;

#[derive(Template)]
#[template(path = "answer.html")]
pub struct AnswerTemplate<'a> {
    pub answer_html: &'a str,
    pub citations: &'a [CitationRecord],
    pub followup_questions: &'a [String],
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_title: String,
    pub app_subtitle: String,
    pub conversation_id: String,
    pub example_questions: Vec<String>,
}

pub fn render_answer_fragment(
    answer_html: &str,
    citations: &[CitationRecord],
    followup_questions: &[String],
) -> Result<String> {
    let template = AnswerTemplate {
        answer_html,
        citations,
        followup_questions,
    };
    Ok(template.render()?)
}
