//! One driver per [`Strategy`]: a short sequence of probes and mutations whose next step is
//! picked from the previous response or diagnostic.

use reststrategy_core::types::{HttpVerb, Strategy};
use serde_json::Value as JsonValue;

use crate::executor::extract::find_by_json_path;
use crate::executor::request::{PreparedAction, Worker};
use crate::executor::result::ActionError;

pub(crate) async fn run_action(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
) -> Result<(), ActionError> {
    let payload = worker
        .render(prepared, &prepared.action.payload_template)
        .into_bytes();

    match prepared.action.strategy {
        Strategy::GetPost => get_post(worker, prepared, payload).await,
        Strategy::FindPost => find_post(worker, prepared, payload).await,
        Strategy::FindPutPost => find_put_post(worker, prepared, payload).await,
        Strategy::FindPatchPost => find_patch_post(worker, prepared, payload).await,
        Strategy::FindDeletePost => find_delete_post(worker, prepared, payload).await,
        Strategy::GetPutPost => get_put_post(worker, prepared, payload).await,
        Strategy::PutPost => put_post(worker, prepared, payload).await,
        Strategy::Put => mutate(worker, prepared, HttpVerb::Put, None, payload).await,
        Strategy::Post => mutate(worker, prepared, HttpVerb::Post, None, payload).await,
    }
}

async fn get_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let body = get(worker, prepared).await?;
    if locate(prepared, &body)?.is_some() {
        worker
            .logger
            .info(&format!("{}: resource exists, skipping POST", prepared.name));
        return Ok(());
    }
    mutate(worker, prepared, HttpVerb::Post, None, payload).await
}

async fn find_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let body = get(worker, prepared).await?;
    let found = find(prepared, &body)?;
    if !found.is_empty() {
        worker.logger.info(&format!(
            "{}: found {found}, skipping POST",
            prepared.name
        ));
        return Ok(());
    }
    mutate(worker, prepared, HttpVerb::Post, None, payload).await
}

async fn find_put_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let body = get(worker, prepared).await?;
    let found = find(prepared, &body)?;
    if found.is_empty() {
        return mutate(worker, prepared, HttpVerb::Post, None, payload).await;
    }
    mutate(worker, prepared, HttpVerb::Put, Some(&found), payload).await
}

async fn find_patch_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let patch_payload = worker
        .render(
            prepared,
            prepared.action.patch_payload_template.as_deref().unwrap_or(""),
        )
        .into_bytes();

    let body = get(worker, prepared).await?;
    let found = find(prepared, &body)?;
    if found.is_empty() {
        return mutate(worker, prepared, HttpVerb::Post, None, payload).await;
    }
    mutate(worker, prepared, HttpVerb::Patch, Some(&found), patch_payload).await
}

async fn find_delete_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let found = match tolerate_fallback(worker, get(worker, prepared).await)? {
        Some(body) => find(prepared, &body)?,
        None => String::new(),
    };

    if !found.is_empty() {
        let url = worker.url(prepared, HttpVerb::Delete, Some(&found))?;
        let deleted = worker
            .send(prepared, HttpVerb::Delete, url, Vec::new())
            .await
            .map_err(ActionError::from);
        tolerate_fallback(worker, deleted)?;
    }
    mutate(worker, prepared, HttpVerb::Post, None, payload).await
}

async fn get_put_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let found = match tolerate_fallback(worker, get(worker, prepared).await)? {
        Some(body) => locate(prepared, &body)?,
        None => None,
    };
    match found {
        None => mutate(worker, prepared, HttpVerb::Post, None, payload).await,
        Some(id) => {
            let id = (!id.is_empty()).then_some(id.as_str());
            mutate(worker, prepared, HttpVerb::Put, id, payload).await
        }
    }
}

async fn put_post(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let url = worker.url(prepared, HttpVerb::Put, None)?;
    let put = worker
        .send(prepared, HttpVerb::Put, url, payload.clone())
        .await
        .map_err(ActionError::from);
    if tolerate_fallback(worker, put)?.is_some() {
        return Ok(());
    }
    mutate(worker, prepared, HttpVerb::Post, None, payload).await
}

async fn get(worker: &Worker<'_>, prepared: &PreparedAction) -> Result<Vec<u8>, ActionError> {
    let url = worker.url(prepared, HttpVerb::Get, None)?;
    Ok(worker.send(prepared, HttpVerb::Get, url, Vec::new()).await?)
}

async fn mutate(
    worker: &Worker<'_>,
    prepared: &PreparedAction,
    verb: HttpVerb,
    found_id: Option<&str>,
    payload: Vec<u8>,
) -> Result<(), ActionError> {
    let url = worker.url(prepared, verb, found_id)?;
    worker.send(prepared, verb, url, payload).await?;
    Ok(())
}

/// `Ok(None)` when the step failed in a way that lets the driver move on to its next verb.
fn tolerate_fallback(
    worker: &Worker<'_>,
    res: Result<Vec<u8>, ActionError>,
) -> Result<Option<Vec<u8>>, ActionError> {
    match res {
        Ok(body) => Ok(Some(body)),
        Err(ActionError::Http(diag)) if diag.allows_fallback() => {
            worker.logger.info(&format!(
                "{}: {} returned {}, falling back",
                diag.name, diag.host_path_method, diag.status
            ));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn find(prepared: &PreparedAction, body: &[u8]) -> Result<String, ActionError> {
    find_by_json_path(body, prepared.action.find_expr()).map_err(|source| ActionError::Extract {
        name: prepared.name.clone(),
        source,
    })
}

/// Reads a GET body for the body-probing drivers. `None` means the resource is absent: the
/// body is empty, or the action has a find expression and it matched nothing. Otherwise the
/// found id, which is `""` for actions without a find expression.
fn locate(prepared: &PreparedAction, body: &[u8]) -> Result<Option<String>, ActionError> {
    if is_body_empty(body) {
        return Ok(None);
    }
    if prepared.action.find_expr().trim().is_empty() {
        return Ok(Some(String::new()));
    }
    let found = find(prepared, body)?;
    Ok((!found.is_empty()).then_some(found))
}

/// Empty after trimming, or the JSON string `""`.
fn is_body_empty(body: &[u8]) -> bool {
    if body.iter().all(u8::is_ascii_whitespace) {
        return true;
    }
    matches!(
        serde_json::from_slice::<JsonValue>(body),
        Ok(JsonValue::String(s)) if s.is_empty()
    )
}
