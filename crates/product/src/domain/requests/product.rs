use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /{company}`. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveProductRequest {
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Option<i32>,

    #[serde(default)]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[serde(default)]
    #[schema(example = 9.99)]
    pub price: Option<f64>,
}

/// What the repository writes: the request plus its generated code.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveProduct {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub code: String,
}

impl SaveProduct {
    pub fn from_request(req: &SaveProductRequest, code: String) -> Self {
        Self {
            id: req.id,
            name: req.name.clone(),
            price: req.price,
            code,
        }
    }
}
