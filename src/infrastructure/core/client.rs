use crate::domain::core::Client;
use crate::infrastructure::JsonStore;

pub type JsonClientRepository = JsonStore<Client>;
