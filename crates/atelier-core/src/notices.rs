//! Fixed user-facing strings.
//!
//! None of these ever carry provider detail, keys, or internal errors.

/// 400 body when the request has no usable `message`.
pub const NO_MESSAGE_PROVIDED: &str = "No message provided";

/// 500 body when the provider API key is not configured.
pub const MISSING_API_KEY: &str = "Server misconfigured: missing API key";

/// 500 body when the provider answered with a non-success status.
pub const UPSTREAM_ERROR: &str = "AI API error, please try again later.";

/// 500 body for unexpected failures (studio variant).
pub const SERVER_ERROR: &str = "Server error, please try again later.";

/// 500 body for unexpected failures (assistant variant).
pub const ASSISTANT_SERVER_ERROR: &str = "AI error, try again later.";

/// Reply the relay substitutes when the provider returned no content.
pub const RELAY_EMPTY_REPLY: &str = "I couldn't answer that right now. Please try again.";

/// Message the widget shows when the relay reply is empty or absent.
pub const WIDGET_EMPTY_REPLY: &str =
    "I couldn't generate a response right now. Please try again.";

/// Message the widget shows when the relay call failed.
pub const WIDGET_RELAY_FAILURE: &str =
    "Something went wrong talking to the AI. Please try again in a moment.";

/// Pending indicator text.
pub const THINKING: &str = "Thinking…";
