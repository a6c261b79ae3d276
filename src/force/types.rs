// Salesforce API types

use serde::Deserialize;

/// Token endpoint response. Only the two fields the app needs are
/// decoded; everything else Salesforce sends (id, token_type, scope,
/// signature, issued_at) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthInfo {
    pub access_token: String,
    pub instance_url: String,
}

/// One Account row from a SOQL query result. Salesforce omits fields
/// that are null on the record, so every column is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub account_type: Option<String>,
    pub industry: Option<String>,
    pub rating: Option<String>,
}

/// SOQL query result envelope. totalSize/done/attributes are ignored.
#[derive(Debug, Deserialize)]
pub struct QueryResult {
    pub records: Vec<Account>,
}
