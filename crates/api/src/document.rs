//! Response envelope shared by every JSON endpoint.

use serde::Serialize;

/// `{ "data": ..., "messages": [...], "errors": [...] }`
#[derive(Debug, Serialize)]
pub struct ApiDocument<T> {
    pub data: Option<T>,
    pub messages: Vec<ApiMessage>,
    pub errors: Vec<ErrorObject>,
}

/// Informational note attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub code: u16,
    pub detail: String,
}

/// One error entry. `code` is the HTTP status of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    pub code: u16,
    pub title: String,
    pub detail: String,
}

impl<T> ApiDocument<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            messages: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<ErrorObject>) -> Self {
        Self {
            data: None,
            messages: Vec::new(),
            errors,
        }
    }

    pub fn with_message(mut self, code: u16, detail: impl Into<String>) -> Self {
        self.messages.push(ApiMessage {
            code,
            detail: detail.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_document_shape() {
        let value = serde_json::to_value(ApiDocument::data(vec![1, 2])).unwrap();
        assert_eq!(value, json!({ "data": [1, 2], "messages": [], "errors": [] }));
    }

    #[test]
    fn test_failure_document_has_null_data() {
        let document = ApiDocument::<()>::failure(vec![ErrorObject {
            code: 404,
            title: "User not found.".to_string(),
            detail: "User not found in the database.".to_string(),
        }]);
        let value = serde_json::to_value(document).unwrap();
        assert!(value["data"].is_null());
        assert_eq!(value["errors"][0]["code"], 404);
        assert_eq!(value["errors"][0]["title"], "User not found.");
    }

    #[test]
    fn test_with_message() {
        let document = ApiDocument::data(true).with_message(200, "Complex deleted.");
        assert_eq!(
            document.messages,
            vec![ApiMessage {
                code: 200,
                detail: "Complex deleted.".to_string()
            }]
        );
    }
}
