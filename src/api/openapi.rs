use crate::api::handlers::{callback, check_auth, health, login, logout, social};
use utoipa::openapi::{Contact, Info, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

/// `OpenAPI` document for the gateway endpoints.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Router for every documented endpoint.
///
/// `OPTIONS /health` and the static fallback are mounted in [`super::app`] and
/// stay out of the document.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(OpenApiBuilder::new().info(cargo_info()).build())
        .routes(routes!(health::health))
        .routes(routes!(login::login))
        .routes(routes!(logout::logout))
        .routes(routes!(check_auth::check_auth))
        .routes(routes!(callback::callback))
        .routes(routes!(social::social_links))
        .routes(routes!(social::social_login));

    router.get_openapi_mut().tags = Some(vec![
        tag("auth", "Session login, logout and status"),
        tag("health", "Build information"),
    ]);

    router
}

fn tag(name: &str, description: &str) -> Tag {
    let mut tag = Tag::new(name);
    tag.description = Some(description.to_string());
    tag
}

fn cargo_info() -> Info {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(non_empty(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = env!("CARGO_PKG_AUTHORS")
        .split(';')
        .next()
        .and_then(contact);

    info.license = non_empty(env!("CARGO_PKG_LICENSE")).map(|spdx| {
        let mut license = License::new(spdx);
        license.identifier = Some(spdx.to_string());
        license
    });

    info
}

/// `Name <email>` as found in Cargo authors.
fn contact(author: &str) -> Option<Contact> {
    let (name, email) = match author.split_once('<') {
        Some((name, rest)) => (non_empty(name), non_empty(rest.trim_end().trim_end_matches('>'))),
        None => (non_empty(author), None),
    };

    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
