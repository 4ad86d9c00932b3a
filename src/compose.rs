use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::answer::parse_answer;
use crate::citations::{citation_records, dedupe_citations};
use crate::config::AppConfig;
use crate::models::{AskRequest, ChatMessage, CitationRecord, RenderRequest, RenderedAnswer};
use crate::render::render_answer_fragment;
use crate::sanitize::sanitize_answer_html;
use crate::upstream::ChatApiClient;

#[derive(Clone)]
pub struct AnswerService {
    config: AppConfig,
    upstream: ChatApiClient,
    upstream_limit: Arc<Semaphore>,
}

impl AnswerService {
    pub fn new(config: AppConfig, upstream: ChatApiClient, upstream_limit: Arc<Semaphore>) -> Self {
        Self {
            config,
            upstream,
            upstream_limit,
        }
    }

    pub async fn ask(&self, request: AskRequest) -> Result<RenderedAnswer> {
        let started = Instant::now();

        let mut messages = request.history;
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.question,
        });

        let _permit = self.upstream_limit.acquire().await?;
        let response = self.upstream.chat(&messages, &request.overrides).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("chat api response contained no choices"))?;

        let records = citation_records(&choice.context);
        let followup_questions = if self.config.ui.show_followup_questions {
            choice.context.followup_questions.unwrap_or_default()
        } else {
            vec![]
        };

        compose_answer(
            &choice.message.content,
            records,
            followup_questions,
            false,
            started,
        )
    }

    pub fn render(&self, request: RenderRequest) -> Result<RenderedAnswer> {
        let started = Instant::now();

        let followup_questions = if self.config.ui.show_followup_questions {
            request.followup_questions
        } else {
            vec![]
        };

        compose_answer(
            &request.answer_text,
            request.records,
            followup_questions,
            request.is_partial,
            started,
        )
    }
}

pub fn compose_answer(
    answer_text: &str,
    records: Vec<CitationRecord>,
    followup_questions: Vec<String>,
    is_partial: bool,
    started: Instant,
) -> Result<RenderedAnswer> {
    let parsed = parse_answer(answer_text, is_partial);
    let answer_html = sanitize_answer_html(&parsed.html);
    let citations = dedupe_citations(records);
    let fragment_html = render_answer_fragment(&answer_html, &citations, &followup_questions)?;

    Ok(RenderedAnswer {
        answer_html,
        fragment_html,
        cited_markers: parsed.cited,
        citations,
        followup_questions,
        is_partial,
        rendered_at: Utc::now(),
        latency_ms: started.elapsed().as_millis(),
    })
}
