use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{from_fields, Aggregation, Entity, Id};

/// Client tax registration code
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref)]
#[serde(transparent)]
pub struct ClientCode(String);

impl Id for ClientCode {}

impl From<&str> for ClientCode {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Field-level change accepted by [`Client`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientChange {
    /// Name changed
    Name(String),
    /// Sex changed
    Sex(String),
    /// Company changed
    Company(String),
    /// Payment method changed
    PaymentMethod(String),
    /// Status changed
    Status(String),
}

/// Client entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    code: ClientCode,
    name: String,
    sex: String,
    company: String,
    payment_method: String,
    status: String,
}

impl Client {
    pub fn create(
        code: ClientCode,
        name: String,
        sex: String,
        company: String,
        payment_method: String,
        status: String,
    ) -> Result<Self, ClientError> {
        Self::validate_code(&code)?;
        Ok(Client {
            code,
            name,
            sex,
            company,
            payment_method,
            status,
        })
    }

    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        let client: Client = from_fields(Self::ENTITY_NAME, value)
            .map_err(|source| ClientError::InvalidFields { source })?;
        Self::validate_code(&client.code)?;
        Ok(client)
    }

    pub fn code(&self) -> &ClientCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn validate_code(code: &ClientCode) -> Result<(), ClientError> {
        match code.trim().is_empty() {
            true => {
                tracing::error!("Client tax code cannot be blank");
                Err(ClientError::CodeIsBlank)
            }
            false => Ok(()),
        }
    }
}

impl Entity for Client {
    type Id = ClientCode;

    const ENTITY_NAME: &'static str = "client";
    const FILE_NAME: &'static str = "clients.json";

    fn id(&self) -> Self::Id {
        self.code.clone()
    }
}

impl Aggregation for Client {
    type Change = ClientChange;
    type Error = ClientError;

    const MUTABLE_FIELDS: &'static [&'static str] =
        &["name", "sex", "company", "payment_method", "status"];

    fn change_from_field(field: &str, value: Value) -> Result<Self::Change, Self::Error> {
        let text: String = serde_json::from_value(value).map_err(|source| {
            ClientError::InvalidValue {
                field: field.to_owned(),
                source,
            }
        })?;
        match field {
            "name" => Ok(ClientChange::Name(text)),
            "sex" => Ok(ClientChange::Sex(text)),
            "company" => Ok(ClientChange::Company(text)),
            "payment_method" => Ok(ClientChange::PaymentMethod(text)),
            "status" => Ok(ClientChange::Status(text)),
            _ => Err(ClientError::NotModifiable {
                field: field.to_owned(),
            }),
        }
    }

    fn validate(&self, _change: &Self::Change) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply(&mut self, change: Self::Change) {
        match change {
            ClientChange::Name(name) => self.name = name,
            ClientChange::Sex(sex) => self.sex = sex,
            ClientChange::Company(company) => self.company = company,
            ClientChange::PaymentMethod(payment_method) => self.payment_method = payment_method,
            ClientChange::Status(status) => self.status = status,
        }
    }
}

/// Client error
#[derive(Error, Display, Debug)]
pub enum ClientError {
    #[display(fmt = "Client tax code cannot be blank")]
    CodeIsBlank,
    #[display(fmt = "Invalid client fields: {}", source)]
    InvalidFields { source: serde_json::Error },
    #[display(fmt = "Invalid value for '{}': {}", field, source)]
    InvalidValue {
        field: String,
        source: serde_json::Error,
    },
    #[display(fmt = "Attribute '{}' is not modifiable", field)]
    NotModifiable { field: String },
}
