/// System instruction for report generation.
pub const REPORT_SYSTEM_PROMPT: &str = r#"You are a research analyst writing a formal research report on the given topic.

Report requirements:
1. Start with a title line, then a short executive summary.
2. Organize the body into clearly headed sections covering background, current state, key actors, and open problems.
3. Use markdown tables where they clarify comparisons or figures.
4. Be exhaustive. Depth is preferred over brevity.
5. No conversational filler. Do not address the reader. Output only the report body in markdown.
6. When prior report content is provided, extend it with new material. Never repeat sections that already exist."#;

/// Builds the user prompt for one research request.
pub fn build_topic_prompt(topic: &str, prior_artifact: &str) -> String {
    if prior_artifact.is_empty() {
        format!("Research topic: {topic}")
    } else {
        format!(
            r#"## Report so far

{prior_artifact}

## New research topic

{topic}

Extend the report with research on the new topic. Do not repeat existing content."#
        )
    }
}
