use serde::{de, Deserialize, Deserializer};

use super::repo_types::NewApplication;

/// Request body for `POST /api/applications`.
///
/// Integer fields also accept numeric text (`"50000"`), the way a Postgres
/// `INTEGER` column accepts a text parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "int_or_numeric_text")]
    pub loan_amount: i32,
    #[serde(default, deserialize_with = "opt_int_or_numeric_text")]
    pub tenure: Option<i32>,
    pub employment_status: Option<String>,
    pub reason: Option<String>,
    pub employment_address: Option<String>,
    pub purpose: String,
}

impl From<SubmitApplicationRequest> for NewApplication {
    fn from(r: SubmitApplicationRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            loan_amount: r.loan_amount,
            tenure: r.tenure,
            employment_status: r.employment_status,
            reason: r.reason,
            employment_address: r.employment_address,
            purpose: r.purpose,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i32),
    Text(String),
}

impl IntOrText {
    fn into_i32<E: de::Error>(self) -> Result<i32, E> {
        match self {
            IntOrText::Int(n) => Ok(n),
            IntOrText::Text(s) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| E::custom(format!("invalid input syntax for type integer: {:?}", s))),
        }
    }
}

fn int_or_numeric_text<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    IntOrText::deserialize(d)?.into_i32()
}

fn opt_int_or_numeric_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Option::<IntOrText>::deserialize(d)?
        .map(IntOrText::into_i32)
        .transpose()
}
