use serde::Serialize;

/// Wire shape for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitRunResponse {
    pub ok: bool,
    pub id: String,
}
