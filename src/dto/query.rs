use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` selector shared by every collection route: present means one
/// record, absent means the whole table.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Record identifier
    pub id: Option<i32>,
}

impl IdQuery {
    pub fn require(self) -> crate::error::Result<i32> {
        self.id
            .ok_or_else(|| crate::error::Error::BadRequest("Missing `id` query parameter".into()))
    }
}
