use serde::{Deserialize, Serialize};

/// Body of `POST /auth/access` responses, and the payload the client echoes
/// back over the socket when the server asks it to authenticate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRefresh {
    pub access_token: String,
}
