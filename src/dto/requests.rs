use money_api_types::Address;
use serde::Deserialize;
use validator::Validate;

// -------- REQUEST DTOs --------
#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 18, max = 130))]
    pub age: u32,
    #[validate(nested)]
    pub address: Option<AddressRequest>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 120))]
    pub street: String,
    #[validate(length(min = 1, max = 60))]
    pub city: String,
    #[validate(length(equal = 8))]
    pub zip_code: String,
}

impl From<AddressRequest> for Address {
    fn from(src: AddressRequest) -> Self {
        Self {
            street: src.street,
            city: src.city,
            zip_code: src.zip_code,
        }
    }
}
