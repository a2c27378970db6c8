//! Request body extractors for the mutating endpoints.
//!
//! Volunteers post from plain HTML forms, so both `/swimmer/add-lap` and
//! `/swimmer/add` accept either `multipart/form-data` or
//! `application/x-www-form-urlencoded`. Only a multipart body can carry an
//! `avatar` file.

use axum::Form;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use serde::Deserialize;
use swim4love_types::NewSwimmer;

use crate::error::ApiError;
use crate::lookup::parse_id;

/// Body of `POST /swimmer/add-lap`.
#[derive(Debug, Default)]
pub struct AddLapForm {
    /// Submitted swimmer id.
    pub id: Option<String>,
}

/// Body of `POST /swimmer/add`.
#[derive(Debug, Default)]
pub struct AddSwimmerForm {
    /// Submitted swimmer id.
    pub id: Option<String>,
    /// Submitted display name.
    pub name: Option<String>,
    /// Uploaded avatar, if a non-empty file was attached.
    pub avatar: Option<Bytes>,
}

impl AddSwimmerForm {
    /// Validate the text fields.
    ///
    /// Presence is checked before format: a blank id reports missing
    /// parameters, a present but malformed one reports an invalid id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameters`] or [`ApiError::InvalidId`].
    pub fn validate(self) -> Result<(NewSwimmer, Option<Bytes>), ApiError> {
        let id = self.id.filter(|s| !s.trim().is_empty());
        let name = self.name.filter(|s| !s.trim().is_empty());
        let (Some(id), Some(name)) = (id, name) else {
            return Err(ApiError::MissingParameters);
        };
        let id = parse_id(Some(&id))?;
        let swimmer = NewSwimmer::new(id, &name).ok_or(ApiError::MissingParameters)?;
        Ok((swimmer, self.avatar))
    }
}

/// The fields either encoding can deliver. Unknown fields are dropped.
#[derive(Debug, Default, Deserialize)]
struct Fields {
    id: Option<String>,
    name: Option<String>,
    #[serde(skip)]
    avatar: Option<Bytes>,
}

impl Fields {
    async fn read<S>(req: Request, state: &S) -> Result<Self, ApiError>
    where
        S: Send + Sync,
    {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedForm(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        // Anything else is read as a url-encoded form; an unreadable body
        // simply has no fields.
        match Form::<Self>::from_request(req, state).await {
            Ok(Form(fields)) => Ok(fields),
            Err(e) => {
                tracing::debug!(reason = %e.body_text(), "Unreadable form body");
                Ok(Self::default())
            }
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let malformed = |e: axum::extract::multipart::MultipartError| {
            ApiError::MalformedForm(e.body_text())
        };

        let mut fields = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some("id") => fields.id = Some(field.text().await.map_err(malformed)?),
                Some("name") => fields.name = Some(field.text().await.map_err(malformed)?),
                Some("avatar") => {
                    let bytes = field.bytes().await.map_err(malformed)?;
                    // Browsers send an empty part when no file was chosen.
                    if !bytes.is_empty() {
                        fields.avatar = Some(bytes);
                    }
                }
                other => {
                    tracing::debug!(field = ?other, "Ignoring unknown form field");
                }
            }
        }
        Ok(fields)
    }
}

impl<S> FromRequest<S> for AddLapForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = Fields::read(req, state).await?;
        Ok(Self { id: fields.id })
    }
}

impl<S> FromRequest<S> for AddSwimmerForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = Fields::read(req, state).await?;
        Ok(Self {
            id: fields.id,
            name: fields.name,
            avatar: fields.avatar,
        })
    }
}
