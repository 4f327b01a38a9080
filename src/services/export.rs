//! Timeline document export: bundle assembly, bounded logo fetch, rendering.

use std::time::Duration;

use crate::domain::types::ClientId;
use crate::export::canvas::DocumentCanvas;
use crate::export::layout::{ExportBundle, render_timeline};
use crate::gateways::LogoFetcher;
use crate::repository::{ClientReader, EventReader, GeneralInfoReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads everything the exporter needs for one client.
pub fn assemble_bundle<R>(repo: &R, client_id: ClientId) -> ServiceResult<ExportBundle>
where
    R: ClientReader + EventReader + GeneralInfoReader,
{
    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;
    let events = repo.list_events(client_id)?;
    let general_info = repo.get_general_info(client_id)?;
    Ok(ExportBundle {
        client,
        events,
        general_info,
    })
}

/// Renders the client's timeline document. The logo fetch is bounded by
/// `logo_timeout`; a slow or unreachable asset host degrades to no logo and
/// never fails the export.
pub fn export_timeline<R, F>(
    repo: &R,
    logo_fetcher: &F,
    canvas: &mut dyn DocumentCanvas,
    client_id: ClientId,
    logo_url: Option<&str>,
    logo_timeout: Duration,
) -> ServiceResult<String>
where
    R: ClientReader + EventReader + GeneralInfoReader,
    F: LogoFetcher + ?Sized,
{
    let bundle = assemble_bundle(repo, client_id)?;

    let logo = logo_url.and_then(|url| {
        let fetched = logo_fetcher.fetch(url, logo_timeout);
        if fetched.is_none() {
            log::warn!("Logo fetch failed or timed out, exporting without it");
        }
        fetched
    });

    render_timeline(canvas, &bundle, logo.as_deref());

    let filename = format!(
        "{}-timeline.pdf",
        bundle.client.client_name.to_lowercase().replace(' ', "-")
    );
    canvas
        .save(&filename)
        .map_err(|err| ServiceError::Internal(format!("could not save the document: {err}")))?;
    Ok(filename)
}
