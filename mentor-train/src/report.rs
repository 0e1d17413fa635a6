//! Console rendering of training outcomes.

use std::io::{self, Write};

use crate::outcome::TrainOutcome;

const RULE: &str = "============================================================";
const MISSING: &str = "N/A";

/// 将训练结果写入输出。
///
/// 成功时输出 message、task_id、document_id；失败时输出状态码、状态描述与详情，
/// 以及常见状态码的排查提示。
///
/// # Errors
/// 当写入失败时返回错误。
pub fn write_outcome<W: Write>(out: &mut W, outcome: &TrainOutcome) -> io::Result<()> {
    match outcome {
        TrainOutcome::Success(response) => {
            writeln!(out, "Upload succeeded")?;
            writeln!(out, "{RULE}")?;
            writeln!(
                out,
                "Message: {}",
                response.message.as_deref().unwrap_or(MISSING)
            )?;
            writeln!(
                out,
                "Task ID: {}",
                response.task_id.as_deref().unwrap_or(MISSING)
            )?;
            writeln!(
                out,
                "Document ID: {}",
                response.document_id.as_deref().unwrap_or(MISSING)
            )?;
            writeln!(out, "{RULE}")?;
        }
        TrainOutcome::Failure {
            status,
            reason,
            detail,
        } => {
            match (status, reason) {
                (Some(code), Some(reason)) => writeln!(out, "Upload failed: HTTP {code} {reason}")?,
                (Some(code), None) => writeln!(out, "Upload failed: HTTP {code}")?,
                (None, _) => writeln!(out, "Upload failed: no HTTP response")?,
            }
            if !detail.is_empty() {
                writeln!(out, "Detail: {detail}")?;
            }
            if let Some(hint) = status.and_then(hint_for_status) {
                writeln!(out, "Check: {hint}")?;
            }
        }
    }
    Ok(())
}

fn hint_for_status(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("pathway ID, file type, or other request fields"),
        401 | 403 => Some("the API key in your credentials file"),
        404 => Some("organization ID, user ID, or pathway ID"),
        413 => Some("file size; the server rejected the document as too large"),
        _ => None,
    }
}
