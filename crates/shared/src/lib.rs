pub mod catalog;

pub mod settings {
    use serde::{Deserialize, Serialize};

    pub const DEFAULT_COMPLETION_URL: &str = "http://127.0.0.1:8787/api/chat";
    pub const DEFAULT_CATALOG_SOURCE: &str = "products.json";

    pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly skincare routine advisor. \
You help people combine the products they picked into a safe, effective daily routine. \
Keep answers practical, explain the order of application, and call out ingredient \
conflicts or products that should not be used together.";

    fn default_completion_url() -> String {
        DEFAULT_COMPLETION_URL.to_string()
    }

    fn default_catalog_source() -> String {
        DEFAULT_CATALOG_SOURCE.to_string()
    }

    fn default_timeout() -> u64 {
        60
    }

    fn default_system_prompt() -> String {
        DEFAULT_SYSTEM_PROMPT.to_string()
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AdvisorSettings {
        /// POST endpoint of the completion service
        #[serde(default = "default_completion_url")]
        pub completion_url: String,
        /// Catalog location: an http(s) URL or a path to a JSON file
        #[serde(default = "default_catalog_source")]
        pub catalog_source: String,
        /// Overrides the platform data directory used for the selection
        #[serde(default)]
        pub storage_dir: Option<String>,
        #[serde(default = "default_timeout")]
        pub request_timeout_secs: u64,
        /// First turn of every conversation
        #[serde(default = "default_system_prompt")]
        pub system_prompt: String,
    }

    impl Default for AdvisorSettings {
        fn default() -> Self {
            Self {
                completion_url: default_completion_url(),
                catalog_source: default_catalog_source(),
                storage_dir: None,
                request_timeout_secs: default_timeout(),
                system_prompt: default_system_prompt(),
            }
        }
    }
}

pub mod agent_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        System,
        User,
        Assistant,
    }

    impl Role {
        pub fn as_str(&self) -> &'static str {
            match self {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub role: Role,
        pub content: String,
    }

    impl ChatMessage {
        pub fn system(content: impl Into<String>) -> Self {
            Self {
                role: Role::System,
                content: content.into(),
            }
        }

        pub fn user(content: impl Into<String>) -> Self {
            Self {
                role: Role::User,
                content: content.into(),
            }
        }

        pub fn assistant(content: impl Into<String>) -> Self {
            Self {
                role: Role::Assistant,
                content: content.into(),
            }
        }
    }

    /// Request body of the completion endpoint
    #[derive(Debug, Serialize)]
    pub struct CompletionRequest<'a> {
        pub messages: &'a [ChatMessage],
    }

    /// Success body of the completion endpoint
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CompletionResponse {
        pub content: String,
    }
}
