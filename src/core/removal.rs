use crate::domain::model::{AppId, PackageId, RemovalOutcome};
use crate::domain::ports::WebSession;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

pub const STEAM_HELP_URL: &str = "https://help.steampowered.com";

const HELP_WIZARD_PATH: &str = "/en/wizard/HelpWithGameIssue/";
const PACKAGE_REMOVE_PATH: &str = "/en/wizard/AjaxDoPackageRemove";
const PACKAGE_INPUT_ID: &str = "packageid";

pub const PAGE_UNAVAILABLE: &str = "page unavailable";
pub const PACKAGE_ID_MISSING: &str = "packageid missing";
pub const PACKAGE_ID_INVALID: &str = "packageid invalid";

#[derive(Debug, Deserialize)]
struct BooleanResponse {
    success: bool,
}

/// An `<input>` element found in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    pub value: Option<String>,
}

/// First `<input>` element of the parsed document whose `id` equals `id`.
///
/// Comments, script text and attribute values are handled by the HTML parser,
/// so only real elements match.
pub fn find_input_by_id(html: &str, id: &str) -> Option<InputElement> {
    let document = Html::parse_document(html);
    let inputs = Selector::parse("input").ok()?;

    document
        .select(&inputs)
        .find(|input| input.value().attr("id") == Some(id))
        .map(|input| InputElement {
            value: input.value().attr("value").map(str::to_string),
        })
}

/// Runs the two-request help-wizard flow that asks Steam to drop a game's
/// package from an account.
#[derive(Debug, Clone)]
pub struct PackageRemover {
    help_url: Url,
}

impl PackageRemover {
    pub fn new(help_url: Url) -> Self {
        Self { help_url }
    }

    pub fn help_url(&self) -> &Url {
        &self.help_url
    }

    pub fn wizard_page_url(&self, app_id: AppId) -> Url {
        let mut url = self.help_url.clone();
        url.set_path(HELP_WIZARD_PATH);
        url.set_query(Some(&format!("appid={}&issueid=123", app_id)));
        url
    }

    pub fn package_remove_url(&self) -> Url {
        let mut url = self.help_url.clone();
        url.set_path(PACKAGE_REMOVE_PATH);
        url.set_query(None);
        url
    }

    /// Never retries: every failed request maps straight to an outcome.
    pub async fn remove(&self, session: &dyn WebSession, app_id: AppId) -> RemovalOutcome {
        let page_url = self.wizard_page_url(app_id);
        tracing::debug!("🔎 app {}: fetching {}", app_id, page_url);

        let html = match session.get_html(&page_url).await {
            Ok(html) if !html.trim().is_empty() => html,
            Ok(_) => {
                tracing::warn!("🔎 app {}: help page was empty", app_id);
                return RemovalOutcome::LookupError(PAGE_UNAVAILABLE.to_string());
            }
            Err(e) => {
                tracing::warn!("🔎 app {}: help page request failed: {}", app_id, e);
                return RemovalOutcome::LookupError(PAGE_UNAVAILABLE.to_string());
            }
        };

        let Some(input) = find_input_by_id(&html, PACKAGE_INPUT_ID) else {
            return RemovalOutcome::LookupError(PACKAGE_ID_MISSING.to_string());
        };

        let package_id = match input
            .value
            .as_deref()
            .and_then(|v| v.trim().parse::<PackageId>().ok())
        {
            Some(id) if id != 0 => id,
            _ => return RemovalOutcome::ValidationError(PACKAGE_ID_INVALID.to_string()),
        };

        let form = [
            ("packageid", package_id.to_string()),
            ("appid", app_id.to_string()),
        ];
        tracing::debug!("🗑️ app {}: requesting removal of package {}", app_id, package_id);

        let reply = match session
            .post_form_json(&self.package_remove_url(), &form, &page_url)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("🗑️ app {}: removal request failed: {}", app_id, e);
                return RemovalOutcome::Failure;
            }
        };

        match serde_json::from_value::<BooleanResponse>(reply) {
            Ok(BooleanResponse { success: true }) => RemovalOutcome::Success,
            Ok(_) => RemovalOutcome::Failure,
            Err(e) => {
                tracing::warn!("🗑️ app {}: unexpected removal reply: {}", app_id, e);
                RemovalOutcome::Failure
            }
        }
    }
}

impl Default for PackageRemover {
    fn default() -> Self {
        Self::new(Url::parse(STEAM_HELP_URL).expect("Steam help URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{package_page, MockSession, RecordedRequest};
    use serde_json::json;

    #[test]
    fn test_wizard_urls() {
        let remover = PackageRemover::default();
        assert_eq!(
            remover.wizard_page_url(440).as_str(),
            "https://help.steampowered.com/en/wizard/HelpWithGameIssue/?appid=440&issueid=123"
        );
        assert_eq!(
            remover.package_remove_url().as_str(),
            "https://help.steampowered.com/en/wizard/AjaxDoPackageRemove"
        );
    }

    #[test]
    fn test_find_input_by_id() {
        let html = r#"<form><input type="hidden" name="x" value="1">
            <INPUT type='hidden' ID='packageid' Value='12345' /></form>"#;
        assert_eq!(
            find_input_by_id(html, "packageid"),
            Some(InputElement {
                value: Some("12345".to_string())
            })
        );

        let unquoted = "<input id=packageid value=77>";
        assert_eq!(
            find_input_by_id(unquoted, "packageid").and_then(|i| i.value),
            Some("77".to_string())
        );

        let no_value = r#"<input id="packageid" disabled>"#;
        assert_eq!(
            find_input_by_id(no_value, "packageid"),
            Some(InputElement { value: None })
        );

        assert_eq!(find_input_by_id(r#"<div id="packageid"></div>"#, "packageid"), None);
        assert_eq!(find_input_by_id(r#"<input id="packageids" value="1">"#, "packageid"), None);
    }

    #[test]
    fn test_find_input_ignores_non_element_text() {
        let commented = r#"<!-- <input id="packageid" value="1"> -->
            <input id="packageid" value="2">"#;
        assert_eq!(
            find_input_by_id(commented, "packageid").and_then(|i| i.value),
            Some("2".to_string())
        );

        let scripted = r#"<script>var t = '<input id="packageid" value="0">';</script>
            <input id="packageid" value="9">"#;
        assert_eq!(
            find_input_by_id(scripted, "packageid").and_then(|i| i.value),
            Some("9".to_string())
        );

        let textarea = r#"<textarea><input id="packageid" value="3"></textarea>"#;
        assert_eq!(find_input_by_id(textarea, "packageid"), None);
    }

    #[test]
    fn test_find_input_reads_attribute_values_as_parsed() {
        let quoted_gt = r#"<input data-tip="a > b" id="packageid" value="7">"#;
        assert_eq!(
            find_input_by_id(quoted_gt, "packageid").and_then(|i| i.value),
            Some("7".to_string())
        );

        let encoded = r#"<input id="packageid" value="&#52;&#50;">"#;
        assert_eq!(
            find_input_by_id(encoded, "packageid").and_then(|i| i.value),
            Some("42".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_uses_real_input_not_commented_one() {
        let page = r#"<html><body><!-- <input id="packageid" value="1"> -->
            <form><input type="hidden" id="packageid" value="2"></form></body></html>"#;
        let session = MockSession::new()
            .with_page(440, page.to_string())
            .with_removal(2, json!({"success": true}));

        assert_eq!(PackageRemover::default().remove(&session, 440).await, RemovalOutcome::Success);
        assert_eq!(session.post_count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_success_posts_expected_form() {
        let session = MockSession::new()
            .with_page(440, package_page("9001"))
            .with_removal(9001, json!({"success": true}));
        let remover = PackageRemover::default();

        let outcome = remover.remove(&session, 440).await;
        assert_eq!(outcome, RemovalOutcome::Success);

        let requests = session.requests().await;
        assert_eq!(requests.len(), 2);
        let page_url = remover.wizard_page_url(440).to_string();
        assert_eq!(requests[0], RecordedRequest::Get { url: page_url.clone() });
        assert_eq!(
            requests[1],
            RecordedRequest::Post {
                url: remover.package_remove_url().to_string(),
                form: vec![
                    ("packageid".to_string(), "9001".to_string()),
                    ("appid".to_string(), "440".to_string()),
                ],
                referer: page_url,
            }
        );
    }

    #[tokio::test]
    async fn test_remove_page_unavailable_skips_post() {
        let session = MockSession::new().with_unreachable_page(440);
        let outcome = PackageRemover::default().remove(&session, 440).await;

        assert_eq!(outcome, RemovalOutcome::LookupError(PAGE_UNAVAILABLE.to_string()));
        assert_eq!(session.post_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_empty_page_is_unavailable() {
        let session = MockSession::new().with_page(440, "   ".to_string());
        let outcome = PackageRemover::default().remove(&session, 440).await;
        assert_eq!(outcome, RemovalOutcome::LookupError(PAGE_UNAVAILABLE.to_string()));
    }

    #[tokio::test]
    async fn test_remove_missing_package_input() {
        let session = MockSession::new().with_page(440, "<html><body>Not owned</body></html>".to_string());
        let outcome = PackageRemover::default().remove(&session, 440).await;

        assert_eq!(outcome, RemovalOutcome::LookupError(PACKAGE_ID_MISSING.to_string()));
        assert_eq!(session.post_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_invalid_package_id() {
        for value in ["0", "abc", ""] {
            let session = MockSession::new().with_page(440, package_page(value));
            let outcome = PackageRemover::default().remove(&session, 440).await;
            assert_eq!(outcome, RemovalOutcome::ValidationError(PACKAGE_ID_INVALID.to_string()));
            assert_eq!(session.post_count().await, 0);
        }
    }

    #[tokio::test]
    async fn test_remove_reported_failure() {
        let session = MockSession::new()
            .with_page(440, package_page("9001"))
            .with_removal(9001, json!({"success": false}));
        assert_eq!(PackageRemover::default().remove(&session, 440).await, RemovalOutcome::Failure);
    }

    #[tokio::test]
    async fn test_remove_malformed_reply_is_failure() {
        let session = MockSession::new()
            .with_page(440, package_page("9001"))
            .with_removal(9001, json!({"result": 1}));
        assert_eq!(PackageRemover::default().remove(&session, 440).await, RemovalOutcome::Failure);

        let session = MockSession::new()
            .with_page(440, package_page("9001"))
            .with_removal(9001, json!({"success": "true"}));
        assert_eq!(PackageRemover::default().remove(&session, 440).await, RemovalOutcome::Failure);
    }

    #[tokio::test]
    async fn test_remove_post_error_is_failure() {
        // 沒有設定 removal 回應時 mock 會回傳 HTTP 500
        let session = MockSession::new().with_page(440, package_page("9001"));
        assert_eq!(PackageRemover::default().remove(&session, 440).await, RemovalOutcome::Failure);
        assert_eq!(session.post_count().await, 1);
    }
}
