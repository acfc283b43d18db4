use utoipa::OpenApi;

use crate::routes::{auth::AuthApi, chat::ChatApi, health::HealthApi};

#[derive(OpenApi)]
#[openapi(info(
    title = "nyay-server",
    description = "Nyay Sahayak legal assistant API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(HealthApi::openapi());
    root.merge(AuthApi::openapi());
    root.merge(ChatApi::openapi());
    root
}
