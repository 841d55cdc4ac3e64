/// Message shown on the detail page when a vote cannot be resolved
pub const INVALID_SELECTION_MESSAGE: &str = "You didn't select a valid choice.";

/// Realm announced by the admin API's basic auth challenge
pub const ADMIN_REALM: &str = "Polls admin";

/// Realm announced by the Swagger UI's basic auth challenge
pub const SWAGGER_REALM: &str = "Swagger UI";
