// All LLM prompt constants for the task endpoint.
// Templates carry `{placeholder}` slots filled by `render_user_prompt`.

use serde_json::Value;

use crate::errors::AppError;
use crate::tasks::inputs::{
    AnalyzeColorsInput, PinterestTitleInput, RewriteContentInput, SelectTopicInput,
};
use crate::tasks::Task;

/// System prompt for topic selection — enforces JSON-only output.
pub const SELECT_TOPIC_SYSTEM: &str = "You are an expert in self-help book topics for Etsy. \
    Select unique, trending therapeutic workbook topics. \
    Always respond with valid JSON only, no markdown.";

/// Topic selection prompt. Replace: {used_topics}
pub const SELECT_TOPIC_PROMPT_TEMPLATE: &str = r##"Select a NEW unique topic for a therapeutic workbook.

Avoid these already used topics: {used_topics}

Choose from categories like:
- Anxiety & Stress Management
- Trauma Recovery (PTSD, childhood trauma, betrayal trauma)
- Self-Esteem & Confidence
- Grief & Loss Processing
- Anger Management
- Codependency Recovery
- Burnout Recovery
- Inner Child Healing
- Boundaries & Assertiveness
- Overthinking & Rumination
- People Pleasing Recovery
- Perfectionism
- Emotional Regulation
- Mindfulness & Meditation
- Shadow Work
- Self-Compassion

Return ONLY this JSON (no markdown, no code blocks):
{
  "chosen_topic": "Specific Topic Name",
  "seo_title": "SEO Title for Etsy - max 140 chars with keywords",
  "cover_subtitle": "Descriptive subtitle with therapeutic approach mentioned",
  "main_keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"],
  "target_audience": "Specific description of who this is for",
  "suggested_accent_color": "#hexcolor",
  "color_mood": "warm or cool or neutral",
  "etsy_tags": ["tag1", "tag2", "tag3", "tag4", "tag5", "tag6", "tag7", "tag8", "tag9", "tag10", "tag11", "tag12", "tag13"],
  "chapter5_title": "Understanding [Specific Aspect of Topic]"
}"##;

/// System prompt for workbook rewriting — enforces JSON-only output.
pub const REWRITE_CONTENT_SYSTEM: &str = "You are an expert therapeutic content writer. \
    Rewrite workbook content for new topics while maintaining the same structure, \
    therapeutic tone, and approximate length. \
    Always respond with valid JSON only.";

/// Workbook rewrite prompt.
/// Replace: {topic}, {keywords}, {target_audience}, {chapter5_title} (appears twice)
pub const REWRITE_CONTENT_PROMPT_TEMPLATE: &str = r#"Rewrite these book sections for: "{topic}"

Keywords to use: {keywords}
Target audience: {target_audience}
Chapter 5 title: {chapter5_title}

Return ONLY this JSON (no markdown):
{
  "introduction": {
    "greeting": "Dear Reader,",
    "opening_paragraph": "Write 2-3 sentences about why they picked up this workbook and validation of their journey (150-200 chars)",
    "quote": {
      "text": "Relevant therapeutic quote",
      "author": "Author Name"
    },
    "why_this_works": "2-3 sentences about the therapeutic approach used (CBT, IFS, somatic, etc)",
    "closing": "Warm closing sentence welcoming them to the journey"
  },
  "chapter2": {
    "title": "THE SCIENCE BEHIND [TOPIC]",
    "mechanism": "Explain the psychological/neurological basis (2-3 sentences)",
    "power_section": "Why this workbook approach is effective (2 sentences)",
    "effectiveness": "Research-backed statement about recovery/improvement"
  },
  "chapter3": {
    "title": "[TOPIC] MAP - IDENTIFYING PATTERNS",
    "intro": "Opening paragraph about mapping their experience",
    "core_wound": "The fundamental wound or belief at the center",
    "manifestations": ["How it shows up 1", "How it shows up 2", "How it shows up 3"],
    "mask": "The protective behavior or facade developed",
    "example_quote": "Example of internal dialogue related to this issue",
    "parable": {
      "title": "The Parable of [Metaphor]",
      "content": "Short therapeutic metaphor story (3-4 sentences)"
    }
  },
  "chapter4": {
    "title": "SELF-ASSESSMENT - YOUR [TOPIC] INVENTORY",
    "intro": "Brief intro to the assessment",
    "questions": [
      "Assessment question 1?",
      "Assessment question 2?",
      "Assessment question 3?",
      "Assessment question 4?",
      "Assessment question 5?"
    ]
  },
  "chapter5": {
    "title": "{chapter5_title}",
    "quote": {
      "text": "Relevant quote for this chapter",
      "author": "Author"
    },
    "what_makes_different": "2-3 sentences about unique aspects of this specific issue",
    "hidden_symptoms": {
      "symptom1": {"name": "Symptom Name", "description": "Brief description"},
      "symptom2": {"name": "Symptom Name", "description": "Brief description"},
      "symptom3": {"name": "Symptom Name", "description": "Brief description"}
    },
    "body_manifestations": ["Physical symptom 1", "Physical symptom 2", "Physical symptom 3"],
    "protective_parts": ["Defense mechanism 1", "Defense mechanism 2", "Defense mechanism 3"],
    "remember_note": "Compassionate reminder about healing not being linear"
  }
}"#;

/// System prompt for interior palette design — enforces JSON-only output.
pub const ANALYZE_COLORS_SYSTEM: &str = "You are an expert color palette designer for book interiors. \
    Create harmonious, readable color schemes. \
    Always respond with valid JSON only.";

/// Interior palette prompt. Replace: {accent_color}, {color_mood}, {topic}
pub const ANALYZE_COLORS_PROMPT_TEMPLATE: &str = r##"Create an interior color palette based on:
Accent color from cover: {accent_color}
Color mood: {color_mood}
Topic: {topic}

Requirements:
- Text must be highly readable (dark on light)
- Accent colors used sparingly for headers/highlights
- Calming, therapeutic feel
- Professional appearance

Return ONLY this JSON:
{
  "main_bg_color": "#ffffff",
  "text_color": "#2d2d2d or similar dark color",
  "accent_color": "#hex - derived from cover accent",
  "secondary_accent": "#hex - lighter version of accent",
  "light_gray": "#hex - very light, almost white",
  "light_viol": "#hex - subtle tinted background",
  "mid_gray": "#hex - for borders and lines",
  "dark_gray": "#hex - for secondary text",
  "soft_green": "#hex - for success/positive elements",
  "box_shadow_rgba": "rgba(R, G, B, 0.12)",
  "gradient_start": "#hex",
  "gradient_end": "#hex",
  "paper_texture_rgba": "rgba(R, G, B, 0.03)",
  "color_description": "Brief description of the palette mood"
}"##;

/// System prompt for Pinterest titles. Plain text, no JSON.
pub const PINTEREST_TITLE_SYSTEM: &str =
    "You create viral Pinterest pin titles for self-help products. \
    Short, emotional, action-oriented.";

/// Pinterest title prompt. Replace: {topic}, {target_audience}
pub const PINTEREST_TITLE_PROMPT_TEMPLATE: &str = r#"Create a Pinterest-style title for a workbook about: {topic}

Target audience: {target_audience}

Requirements:
- Max 8-10 words
- Emotional hook
- Use words like: Finally, Secret, Transform, Heal, Free, Peace, etc.
- No hashtags

Return ONLY the title text, nothing else."#;

/// Builds the user instruction for `task` from its `data` mapping.
pub fn render_user_prompt(task: Task, data: &Value) -> Result<String, AppError> {
    let prompt = match task {
        Task::SelectTopic => {
            let input = SelectTopicInput::from_data(data)?;
            fill(
                SELECT_TOPIC_PROMPT_TEMPLATE,
                &[("used_topics", input.used_topics.as_str())],
            )
        }
        Task::RewriteContent => {
            let input = RewriteContentInput::from_data(data)?;
            fill(
                REWRITE_CONTENT_PROMPT_TEMPLATE,
                &[
                    ("topic", input.topic.as_str()),
                    ("keywords", input.keywords.as_str()),
                    ("target_audience", input.target_audience.as_str()),
                    ("chapter5_title", input.chapter5_title.as_str()),
                ],
            )
        }
        Task::AnalyzeColors => {
            let input = AnalyzeColorsInput::from_data(data);
            fill(
                ANALYZE_COLORS_PROMPT_TEMPLATE,
                &[
                    ("accent_color", input.accent_color.as_str()),
                    ("color_mood", input.color_mood.as_str()),
                    ("topic", input.topic.as_str()),
                ],
            )
        }
        Task::PinterestTitle => {
            let input = PinterestTitleInput::from_data(data);
            fill(
                PINTEREST_TITLE_PROMPT_TEMPLATE,
                &[
                    ("topic", input.topic.as_str()),
                    ("target_audience", input.target_audience.as_str()),
                ],
            )
        }
    };
    Ok(prompt)
}

/// Single-pass placeholder substitution. Substituted values are never rescanned,
/// and braces that do not name a known slot are copied through.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open + 1..];

        let slot = values.iter().find(|(key, _)| {
            candidate
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });

        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &candidate[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fill_replaces_known_slots_only() {
        let out = fill(r#"{"a": "{x}", "b": {y}} {z}"#, &[("x", "1"), ("y", "2")]);
        assert_eq!(out, r#"{"a": "1", "b": 2} {z}"#);
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("{topic} / {keywords}", &[("topic", "{keywords}"), ("keywords", "k")]);
        assert_eq!(out, "{keywords} / k");
    }

    #[test]
    fn test_select_topic_without_history_says_none() {
        let prompt = render_user_prompt(Task::SelectTopic, &json!({})).unwrap();
        assert!(prompt.contains("Avoid these already used topics: none\n"));
        assert!(prompt.contains(r#""chapter5_title": "Understanding [Specific Aspect of Topic]""#));
    }

    #[test]
    fn test_select_topic_lists_used_topics() {
        let data = json!({"usedTopics": ["Shadow Work", "Perfectionism"]});
        let prompt = render_user_prompt(Task::SelectTopic, &data).unwrap();
        assert!(prompt.contains("Avoid these already used topics: Shadow Work, Perfectionism"));
    }

    #[test]
    fn test_rewrite_content_interpolates_chapter5_title_twice() {
        let data = json!({
            "topic": "People Pleasing Recovery",
            "keywords": ["boundaries", "self-worth"],
            "targetAudience": "Women who struggle to say no",
            "chapter5Title": "Understanding the Fawn Response"
        });
        let prompt = render_user_prompt(Task::RewriteContent, &data).unwrap();
        assert!(prompt.starts_with(r#"Rewrite these book sections for: "People Pleasing Recovery""#));
        assert!(prompt.contains("Keywords to use: boundaries, self-worth"));
        assert!(prompt.contains("Target audience: Women who struggle to say no"));
        assert_eq!(prompt.matches("Understanding the Fawn Response").count(), 2);
        assert!(prompt.contains(r#""title": "Understanding the Fawn Response","#));
        assert!(!prompt.contains("{chapter5_title}"));
    }

    #[test]
    fn test_analyze_colors_interpolates_inputs() {
        let data = json!({"accentColor": "#7a5c9e", "colorMood": "cool", "topic": "Grief"});
        let prompt = render_user_prompt(Task::AnalyzeColors, &data).unwrap();
        assert!(prompt.contains("Accent color from cover: #7a5c9e\nColor mood: cool\nTopic: Grief"));
        assert!(prompt.contains(r#""paper_texture_rgba": "rgba(R, G, B, 0.03)""#));
    }

    #[test]
    fn test_pinterest_title_interpolates_inputs() {
        let data = json!({"topic": "Overthinking", "targetAudience": "Busy professionals"});
        let prompt = render_user_prompt(Task::PinterestTitle, &data).unwrap();
        assert!(prompt.contains("workbook about: Overthinking"));
        assert!(prompt.contains("Target audience: Busy professionals"));
    }

    #[test]
    fn test_missing_fields_render_undefined() {
        let prompt = render_user_prompt(Task::AnalyzeColors, &json!({"topic": "Grief"})).unwrap();
        assert!(prompt.contains("Accent color from cover: undefined\nColor mood: undefined"));

        let prompt = render_user_prompt(Task::RewriteContent, &json!({})).unwrap();
        assert!(prompt.starts_with(r#"Rewrite these book sections for: "undefined""#));
        assert!(prompt.contains("Keywords to use: none"));
        assert!(prompt.contains(r#""title": "undefined","#));
    }

    #[test]
    fn test_non_list_used_topics_fails_to_build() {
        let err = render_user_prompt(Task::SelectTopic, &json!({"usedTopics": "Grief"})).unwrap_err();
        assert!(matches!(
            err,
            AppError::TaskData {
                task: Task::SelectTopic,
                ..
            }
        ));
    }

    #[test]
    fn test_templates_have_no_unfilled_slots() {
        let samples = [
            (Task::SelectTopic, json!({"usedTopics": ["A"]})),
            (
                Task::RewriteContent,
                json!({"topic": "T", "targetAudience": "A", "chapter5Title": "C"}),
            ),
            (
                Task::AnalyzeColors,
                json!({"accentColor": "#000000", "colorMood": "warm", "topic": "T"}),
            ),
            (Task::PinterestTitle, json!({"topic": "T", "targetAudience": "A"})),
        ];
        for (task, data) in samples {
            let prompt = render_user_prompt(task, &data).unwrap();
            for slot in [
                "{used_topics}",
                "{topic}",
                "{keywords}",
                "{target_audience}",
                "{chapter5_title}",
                "{accent_color}",
                "{color_mood}",
            ] {
                assert!(!prompt.contains(slot), "{task} left {slot} unfilled");
            }
        }
    }
}
