use reqwest::Url;

use crate::address::{Address, Provenance};
use crate::credential::ApiKey;

/// The unwrapped `data` payload of a response together with its provenance.
///
/// Every read or write operation returns a handle. Since it records the
/// canonical URI of the resource and the credential used to reach it, a
/// handle can be passed directly into the next operation.
#[derive(Debug, Clone)]
pub struct Handle<T> {
    /// The server's payload.
    pub data: T,
    address: Address,
}

impl<T> Handle<T> {
    pub fn new(data: T, address: Address) -> Self {
        Handle { data, address }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> Provenance for Handle<T> {
    fn request_uri(&self) -> &Url {
        self.address.uri()
    }

    fn credential(&self) -> &ApiKey {
        self.address.credential()
    }

    fn address(&self) -> Address {
        self.address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_reports_provenance() {
        let address = Address::from_uri(
            "https://demo.dataverse.org/api/dataverses/root",
            Some(ApiKey::new("token")),
        )
        .unwrap();

        let handle = Handle::new(42, address.clone());

        assert_eq!(handle.address(), address);
        assert_eq!(handle.request_uri(), address.uri());
        assert_eq!(handle.credential().secret(), "token");
        assert_eq!(handle.into_data(), 42);
    }
}
