use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AccountDoc {
    pub account_id: i64,
    pub iban: String,
    pub bic_swift: String,
    pub client_id: i64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AccountDraftDoc {
    pub iban: String,
    pub bic_swift: String,
    pub client_id: i64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CardDoc {
    pub card_id: i64,
    pub card_alias: String,
    pub account_id: i64,
    /// Open label such as `Virtual` or `Physical`.
    pub type_of_card: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CardDraftDoc {
    pub card_alias: String,
    pub account_id: i64,
    pub type_of_card: String,
}

/// `accountId` and `typeOfCard` are accepted but never applied.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CardPatchDoc {
    pub card_alias: String,
    pub account_id: Option<i64>,
    pub type_of_card: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::list,
        crate::routes::accounts::get,
        crate::routes::accounts::create,
        crate::routes::accounts::update,
        crate::routes::accounts::delete,
        crate::routes::cards::list,
        crate::routes::cards::list_for_account,
        crate::routes::cards::get,
        crate::routes::cards::create,
        crate::routes::cards::update,
        crate::routes::cards::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AccountDoc,
            AccountDraftDoc,
            CardDoc,
            CardDraftDoc,
            CardPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "cards")
    )
)]
pub struct ApiDoc;
