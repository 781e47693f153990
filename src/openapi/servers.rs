use std::io::{BufRead, Write};

use tracing::info;

use crate::error::{AppError, AppResult, ValidationError};

use super::model::ApiSpec;

pub const MAX_SELECTION_ATTEMPTS: usize = 3;

/// Server URLs with each `{variable}` replaced by its default value.
#[must_use]
pub fn server_candidates(spec: &ApiSpec) -> Vec<String> {
    spec.servers
        .iter()
        .map(|server| {
            server
                .variables
                .iter()
                .fold(server.url.clone(), |url, (name, value)| {
                    url.replacen(&format!("{{{}}}", name), value, 1)
                })
        })
        .collect()
}

/// Asks the user to pick one of `candidates` by number.
///
/// A single candidate is taken without prompting. Invalid answers are
/// reported and asked again, up to `max_attempts` times in total.
///
/// # Errors
///
/// Returns [`ValidationError::MissingBase`] when there is nothing to pick, and
/// [`ValidationError::InvalidServerSelection`] when no valid answer arrives.
pub fn select_base<R, W>(
    candidates: &[String],
    mut reader: R,
    mut writer: W,
    max_attempts: usize,
) -> AppResult<String>
where
    R: BufRead,
    W: Write,
{
    if candidates.is_empty() {
        return Err(AppError::validation(ValidationError::MissingBase));
    }
    if let [only] = candidates {
        info!("No base given, using the only server {}", only);
        return Ok(only.clone());
    }

    writeln!(writer, "No base given. Select a server.")?;
    for (index, candidate) in candidates.iter().enumerate() {
        writeln!(writer, "  [{}] {}", index, candidate)?;
    }

    for _ in 0..max_attempts {
        write!(writer, "Pick a server no.: ")?;
        writer.flush()?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).map_err(|err| {
            AppError::validation(ValidationError::ReadServerSelection { source: err })
        })?;
        if read == 0 {
            break;
        }

        match line.trim().parse::<usize>() {
            Ok(index) => {
                if let Some(candidate) = candidates.get(index) {
                    return Ok(candidate.clone());
                }
                writeln!(writer, "There is no server no. {}.", index)?;
            }
            Err(_) => writeln!(writer, "'{}' is not a server number.", line.trim())?,
        }
    }

    Err(AppError::validation(ValidationError::InvalidServerSelection {
        attempts: max_attempts,
    }))
}
