//! Multipart form assembly for authoring endpoints

use courseportal_domain::UploadFile;
use reqwest::multipart::{Form, Part};

use super::errors::ApiError;

pub(crate) fn text_form<I>(fields: I) -> Form
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    fields.into_iter().fold(Form::new(), |form, (name, value)| form.text(name, value))
}

pub(crate) fn attach_file(form: Form, name: &'static str, file: &UploadFile) -> Result<Form, ApiError> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| ApiError::Validation(format!("invalid MIME type '{}': {e}", file.mime_type)))?;
    Ok(form.part(name, part))
}
