//! Creative HTML generator implementation.

use serde::Serialize;
use sonar_types::{QuestionNode, ResponseType, Survey};

use crate::assets::{DEFAULT_CSS, NAVIGATION_SCRIPT};

/// Segmentation label used by previews.
pub const PREVIEW_SEGMENTATION: &str = "preview";

/// Options for creative generation.
#[derive(Debug, Clone, Default)]
pub struct CreativeOptions {
    /// Store id of the survey, sent back with every response.
    pub survey_id: String,
    /// Experiment arm label, e.g. `default_control`. Empty for brand track.
    pub segmentation: String,
    /// Endpoint the creative reports responses to.
    pub receiver_url: Option<String>,
    /// Render a back button below the creative.
    pub show_back_button: bool,
    /// Never send responses; the operator is clicking through by hand.
    pub manual_responses: bool,
}

impl CreativeOptions {
    /// Options for an exported creative with an empty segmentation.
    pub fn new(survey_id: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            ..Self::default()
        }
    }

    /// Options for an operator preview: `preview` segmentation, back button,
    /// responses suppressed.
    pub fn preview(survey_id: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            segmentation: PREVIEW_SEGMENTATION.to_string(),
            receiver_url: None,
            show_back_button: true,
            manual_responses: true,
        }
    }

    /// Set the segmentation label.
    pub fn with_segmentation(mut self, segmentation: impl Into<String>) -> Self {
        self.segmentation = segmentation.into();
        self
    }

    /// Set or clear the receiver URL.
    pub fn with_receiver_url(mut self, url: Option<String>) -> Self {
        self.receiver_url = url;
        self
    }
}

/// State handed to the navigation script.
#[derive(Serialize)]
struct CreativeConfig<'a> {
    survey_id: &'a str,
    segmentation: &'a str,
    receiver_url: Option<&'a str>,
    manual_responses: bool,
    submit_immediately: bool,
    comment_text: &'static str,
    questions: Vec<QuestionNode>,
}

/// Render a survey as a complete, self-contained HTML document.
///
/// The survey's `custom_css` replaces [`DEFAULT_CSS`] when present.
pub fn render_creative(
    survey: &Survey,
    options: &CreativeOptions,
) -> Result<String, serde_json::Error> {
    let language = survey.language;
    let config = CreativeConfig {
        survey_id: &options.survey_id,
        segmentation: &options.segmentation,
        receiver_url: options.receiver_url.as_deref(),
        manual_responses: options.manual_responses,
        submit_immediately: survey.response_type == ResponseType::Immediately,
        comment_text: language.comment_text(),
        questions: survey.question_nodes(),
    };
    let config_json = escape_script(&serde_json::to_string(&config)?);
    let css = survey.custom_css.as_deref().unwrap_or(DEFAULT_CSS);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n<head>\n", language.code()));
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("  <title>{}</title>\n", escape_html(&survey.name)));
    html.push_str("  <style>\n");
    html.push_str(&escape_script(css));
    html.push_str("\n  </style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "  <div id=\"master_container\" data-survey-id=\"{}\" data-segmentation=\"{}\">\n",
        escape_html(&options.survey_id),
        escape_html(&options.segmentation),
    ));
    html.push_str("    <div id=\"survey_container\">\n");
    html.push_str("      <div class=\"Qbox\"><span id=\"question_text\"></span><span id=\"question_comment\"></span></div>\n");
    html.push_str("      <div id=\"option_list\"></div>\n");
    html.push_str("    </div>\n");
    html.push_str(&format!(
        "    <div id=\"thankyou_container\" class=\"thankyoucontainer invisible\">{}</div>\n",
        escape_html(language.thank_you_text())
    ));
    html.push_str(&format!(
        "    <div id=\"bottom_container\"><div id=\"next_button\" class=\"invisible\">{}</div></div>\n",
        escape_html(language.next_text())
    ));
    html.push_str("    <div id=\"ad_background\"><div id=\"ad_text\">AD</div></div>\n");
    html.push_str("  </div>\n");

    if options.show_back_button {
        html.push_str(
            "  <button type=\"button\" id=\"back_button\" onclick=\"history.back()\">Back</button>\n",
        );
    }

    html.push_str(&format!(
        "  <script type=\"application/json\" id=\"sonar_config\">{config_json}</script>\n"
    ));
    html.push_str("  <script>\n");
    html.push_str(NAVIGATION_SCRIPT);
    html.push_str("  </script>\n");
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

/// HTML-escape a string.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep embedded text from closing its `<script>` or `<style>` element.
fn escape_script(s: &str) -> String {
    s.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use sonar_types::{Answer, AnswerLetter, Language, Question, QuestionSlot};

    use super::*;

    fn survey() -> Survey {
        Survey::new("Spring <Promo>").with_question(
            QuestionSlot::ENTRY,
            Question::new("Have you seen our ad?")
                .with_answer(AnswerLetter::A, Answer::new("Yes", "2"))
                .with_answer(AnswerLetter::B, Answer::ending("No")),
        )
    }

    fn embedded_config(html: &str) -> serde_json::Value {
        let start = html.find("id=\"sonar_config\">").unwrap() + "id=\"sonar_config\">".len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap()
    }

    #[test]
    fn embeds_question_nodes_and_identity() {
        let options = CreativeOptions::new("abc123")
            .with_segmentation("default_expose")
            .with_receiver_url(Some("https://receiver.example/collect".to_string()));
        let html = render_creative(&survey(), &options).unwrap();
        let config = embedded_config(&html);

        assert_eq!(config["survey_id"], "abc123");
        assert_eq!(config["segmentation"], "default_expose");
        assert_eq!(config["receiver_url"], "https://receiver.example/collect");
        assert_eq!(config["manual_responses"], false);
        assert_eq!(config["submit_immediately"], false);
        assert_eq!(config["questions"][0]["text"], "Have you seen our ad?");
        assert_eq!(config["questions"][0]["next_question"]["A"], "2");
        assert!(html.contains("data-segmentation=\"default_expose\""));
    }

    #[test]
    fn preview_shows_back_button_and_suppresses_responses() {
        let html = render_creative(&survey(), &CreativeOptions::preview("abc123")).unwrap();
        let config = embedded_config(&html);

        assert!(html.contains("id=\"back_button\""));
        assert_eq!(config["segmentation"], PREVIEW_SEGMENTATION);
        assert_eq!(config["manual_responses"], true);

        let exported = render_creative(&survey(), &CreativeOptions::new("abc123")).unwrap();
        assert!(!exported.contains("id=\"back_button\""));
    }

    #[test]
    fn uses_language_strings() {
        let survey = survey().with_language(Language::French);
        let html = render_creative(&survey, &CreativeOptions::new("x")).unwrap();

        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains(">Merci</div>"));
        assert!(html.contains(">Suivante</div>"));
        assert_eq!(
            embedded_config(&html)["comment_text"],
            "Choisissez tout ce qui s'applique"
        );
    }

    #[test]
    fn custom_css_replaces_default() {
        let html = render_creative(&survey(), &CreativeOptions::new("x")).unwrap();
        assert!(html.contains("#master_container {"));

        let mut custom = survey();
        custom.custom_css = Some(".Qbox { color: red; }".to_string());
        let html = render_creative(&custom, &CreativeOptions::new("x")).unwrap();
        assert!(html.contains(".Qbox { color: red; }"));
        assert!(!html.contains("#master_container {"));
    }

    #[test]
    fn escapes_markup_in_survey_text() {
        let mut hostile = survey();
        hostile.question_mut(QuestionSlot::ENTRY).text = "</script><b>bold</b>".to_string();
        let html = render_creative(&hostile, &CreativeOptions::new("x")).unwrap();

        assert!(html.contains("<title>Spring &lt;Promo&gt;</title>"));
        assert_eq!(html.matches("</script>").count(), 2);
        assert_eq!(
            embedded_config(&html)["questions"][0]["text"],
            "</script><b>bold</b>"
        );
    }

    #[test]
    fn immediate_submission_is_flagged() {
        let mut survey = survey();
        survey.response_type = ResponseType::Immediately;
        let html = render_creative(&survey, &CreativeOptions::new("x")).unwrap();
        assert_eq!(embedded_config(&html)["submit_immediately"], true);
    }
}
