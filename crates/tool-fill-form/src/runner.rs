use autofill_core_types::{CanonicalField, CanonicalRecord, FillId};
use field_locator::{Locator, LocatorChain, SiteMapping};
use tracing::{debug, info, instrument, warn};

use crate::matcher::{match_option, MatchKind};
use crate::model::{FieldOutcome, FillResult};
use crate::ports::{ControlKind, ElementHandle, PageError, PageEvent, PagePort};

/// Why a resolved element did not take the value.
#[derive(Debug)]
enum WriteFailure {
    Page(PageError),
    NoOption,
}

impl From<PageError> for WriteFailure {
    fn from(err: PageError) -> Self {
        WriteFailure::Page(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteEffect {
    Written,
    /// The control already held the value; nothing was written or emitted.
    Unchanged,
}

#[instrument(skip_all, fields(fill = %fill_id, generation = generation))]
pub(crate) fn execute(
    record: &CanonicalRecord,
    mapping: &SiteMapping,
    page: &dyn PagePort,
    fill_id: FillId,
    generation: u64,
) -> FillResult {
    let mut result = FillResult::new(fill_id, generation);

    for field in CanonicalField::ALL {
        let Some(value) = record.get(field) else {
            continue;
        };
        let outcome = match mapping.chain(field) {
            None => {
                debug!(field = %field, "field has a value but no configured locator");
                FieldOutcome::NoLocatorPresent
            }
            Some(chain) => fill_field(page, field, chain, value),
        };
        result.record(field, outcome);
    }

    info!(
        attempted = result.attempted(),
        filled = result.filled(),
        "fill finished"
    );
    result.finish()
}

fn fill_field(
    page: &dyn PagePort,
    field: CanonicalField,
    chain: &LocatorChain,
    value: &str,
) -> FieldOutcome {
    for (rank, locator) in chain.ranked() {
        let resolved = match page.resolve_one(locator) {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                debug!(field = %field, locator = %locator, "locator matched nothing");
                continue;
            }
            Err(err) => {
                warn!(field = %field, locator = %locator, %err, "locator failed to resolve");
                continue;
            }
        };

        let attempt = match resolved.kind {
            ControlKind::FreeText => write_free_text(page, &resolved.handle, value),
            ControlKind::Choice => write_choice(page, &resolved.handle, value),
            ControlKind::Other => Err(WriteFailure::Page(PageError::UnsupportedControl(
                resolved.handle.0.clone(),
            ))),
        };

        match attempt {
            Ok(effect) => {
                info!(field = %field, locator = %locator, rank, ?effect, "field filled");
                return filled_by(rank, locator);
            }
            Err(WriteFailure::NoOption) => {
                debug!(field = %field, locator = %locator, value, "no option matched value");
            }
            Err(WriteFailure::Page(err)) => {
                warn!(field = %field, locator = %locator, %err, "element did not accept value");
            }
        }
    }

    info!(field = %field, "could not fill field");
    FieldOutcome::NoMatch
}

fn filled_by(rank: usize, locator: &Locator) -> FieldOutcome {
    FieldOutcome::FilledByLocator {
        rank,
        locator: locator.to_string(),
    }
}

fn write_free_text(
    page: &dyn PagePort,
    element: &ElementHandle,
    value: &str,
) -> Result<WriteEffect, WriteFailure> {
    if current_value(page, element).as_deref() == Some(value) {
        return Ok(WriteEffect::Unchanged);
    }
    page.write_value(element, value)?;
    page.emit(element, PageEvent::Input)?;
    page.emit(element, PageEvent::Change)?;
    Ok(WriteEffect::Written)
}

fn write_choice(
    page: &dyn PagePort,
    element: &ElementHandle,
    value: &str,
) -> Result<WriteEffect, WriteFailure> {
    let options = page.read_options(element)?;
    let hit = match_option(&options, value).ok_or(WriteFailure::NoOption)?;
    if hit.kind == MatchKind::Substring {
        debug!(target_value = value, option = %hit.option.label, "using substring option match");
    }
    if current_value(page, element).as_deref() == Some(hit.option.value.as_str()) {
        return Ok(WriteEffect::Unchanged);
    }
    page.write_value(element, &hit.option.value)?;
    page.emit(element, PageEvent::Change)?;
    Ok(WriteEffect::Written)
}

fn current_value(page: &dyn PagePort, element: &ElementHandle) -> Option<String> {
    page.read_value(element).ok().flatten()
}
