//! Canonical resource addresses and the rules for deriving one from another.
//!
//! Every operation in the native API works on an [`Address`]: an absolute
//! resource URI plus the credential used to reach it. Addresses are either
//! taken from the provenance of a previously returned handle or built from a
//! raw URI and an explicit credential. Child and sibling resources are reached
//! by trimming trailing path segments and appending new ones, so following a
//! hierarchy never needs an extra lookup request.

use reqwest::Url;

use crate::credential::ApiKey;
use crate::datasetversion::DatasetVersion;
use crate::error::{DataverseError, Result};
use crate::identifier::Identifier;

/// Anything that remembers where it came from and which credential fetched it.
pub trait Provenance {
    /// The canonical URI of the resource.
    fn request_uri(&self) -> &Url;

    /// The credential used to fetch or create the resource.
    fn credential(&self) -> &ApiKey;

    /// Converts the provenance into an address usable for the next call.
    fn address(&self) -> Address {
        Address::new(self.request_uri().clone(), self.credential().clone())
    }
}

/// A resource URI paired with the credential used to access it.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    uri: Url,
    credential: ApiKey,
}

impl Provenance for Address {
    fn request_uri(&self) -> &Url {
        &self.uri
    }

    fn credential(&self) -> &ApiKey {
        &self.credential
    }

    fn address(&self) -> Address {
        self.clone()
    }
}

impl Address {
    pub fn new(uri: Url, credential: ApiKey) -> Self {
        Address { uri, credential }
    }

    /// Builds an address from a raw URI. The credential is mandatory here,
    /// since there is no handle to inherit it from.
    pub fn from_uri(uri: &str, credential: Option<ApiKey>) -> Result<Self> {
        let credential = credential.ok_or_else(|| {
            DataverseError::precondition(format!(
                "A credential is required when addressing '{uri}' by URI"
            ))
        })?;

        let uri = Url::parse(uri).map_err(|e| {
            DataverseError::precondition(format!("'{uri}' is not a valid URI: {e}"))
        })?;

        Ok(Address { uri, credential })
    }

    /// Normalizes the two ways of naming a target into one address.
    ///
    /// Exactly one of `handle` and `uri` must be given. With a handle, the
    /// explicit `credential` (if any) overrides the one recorded in the
    /// handle's provenance; with a raw URI the credential is mandatory.
    pub fn resolve(
        handle: Option<&dyn Provenance>,
        uri: Option<&str>,
        credential: Option<ApiKey>,
    ) -> Result<Self> {
        match (handle, uri) {
            (Some(handle), None) => {
                let address = handle.address();
                Ok(match credential {
                    Some(credential) => address.with_credential(credential),
                    None => address,
                })
            }
            (None, Some(uri)) => Address::from_uri(uri, credential),
            (Some(_), Some(_)) => Err(DataverseError::precondition(
                "Either a resource handle or a URI must be given, not both",
            )),
            (None, None) => Err(DataverseError::precondition(
                "Neither a resource handle nor a URI was given",
            )),
        }
    }

    /// Address of the dataverse `alias` on the instance at `base_url`.
    pub fn for_dataverse(base_url: &str, alias: &str, credential: ApiKey) -> Result<Self> {
        Self::from_base(base_url, credential)?.derive(0, &["api", "dataverses", alias])
    }

    /// Address of a dataset on the instance at `base_url`, by database id or
    /// persistent identifier.
    pub fn for_dataset(base_url: &str, id: &Identifier, credential: ApiKey) -> Result<Self> {
        let mut address = Self::from_base(base_url, credential)?.derive(
            0,
            &["api", "datasets", id.path_segment().as_str()],
        )?;

        if let Some((key, value)) = id.query_pair() {
            address.uri.query_pairs_mut().append_pair(key, value);
        }

        Ok(address)
    }

    fn from_base(base_url: &str, credential: ApiKey) -> Result<Self> {
        let mut address = Address::from_uri(base_url, Some(credential))?;
        address.uri.set_query(None);
        address.uri.set_fragment(None);
        Ok(address)
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Replaces the credential, keeping the URI.
    pub fn with_credential(mut self, credential: ApiKey) -> Self {
        self.credential = credential;
        self
    }

    /// Drops the last `drop` path segments and appends `segments`.
    ///
    /// The query string survives only when nothing is dropped, i.e. when the
    /// derived resource lives below the current one.
    pub fn derive(&self, drop: usize, segments: &[&str]) -> Result<Address> {
        if self.uri.cannot_be_a_base() {
            return Err(DataverseError::precondition(format!(
                "'{}' has no path to derive an address from",
                self.uri
            )));
        }

        let mut path: Vec<&str> = self
            .uri
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if drop > path.len() {
            return Err(DataverseError::precondition(format!(
                "Cannot drop {drop} path segments from '{}', it only has {}",
                self.uri,
                path.len()
            )));
        }
        path.truncate(path.len() - drop);

        for &segment in segments {
            if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
                return Err(DataverseError::precondition(format!(
                    "'{segment}' is not a valid path segment"
                )));
            }
            path.push(segment);
        }

        let mut uri = self.uri.clone();
        uri.set_path(&format!("/{}", path.join("/")));
        uri.set_fragment(None);
        if drop > 0 {
            uri.set_query(None);
        }

        Ok(Address {
            uri,
            credential: self.credential.clone(),
        })
    }

    /// `.../dataverses/{alias}` → `.../dataverses/{alias}/contents`
    pub fn contents(&self) -> Result<Address> {
        self.derive(0, &["contents"])
    }

    /// `.../dataverses/{alias}` → `.../dataverses/{alias}/assignments`
    pub fn assignments(&self) -> Result<Address> {
        self.derive(0, &["assignments"])
    }

    /// Replaces the last segment, e.g. `.../dataverses/visus` → `.../dataverses/{segment}`.
    pub fn sibling(&self, segment: &str) -> Result<Address> {
        self.derive(1, &[segment])
    }

    /// `.../dataverses/{alias}` → `.../datasets`
    pub fn datasets_base(&self) -> Result<Address> {
        self.derive(2, &["datasets"])
    }

    /// `.../dataverses/{alias}` → `.../datasets/{id}`
    pub fn dataset(&self, id: i64) -> Result<Address> {
        self.derive(2, &["datasets", id.to_string().as_str()])
    }

    /// `.../dataverses/{alias}` → `.../dataverses/{alias}/datasets`, the dataset creation endpoint.
    pub fn dataset_collection(&self) -> Result<Address> {
        self.derive(0, &["datasets"])
    }

    /// `.../datasets/{id}` → `.../datasets/{id}/versions/{version}/files`
    pub fn version_files(&self, version: &DatasetVersion) -> Result<Address> {
        self.derive(0, &["versions", version.to_string().as_str(), "files"])
    }

    /// `.../datasets/{id}` → `.../datasets/{id}/versions/{version}/metadata[/{block}]`
    pub fn version_metadata(
        &self,
        version: &DatasetVersion,
        block: Option<&str>,
    ) -> Result<Address> {
        let version = version.to_string();
        match block {
            Some(block) => self.derive(0, &["versions", version.as_str(), "metadata", block]),
            None => self.derive(0, &["versions", version.as_str(), "metadata"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISUS: &str = "https://darus.uni-stuttgart.de/api/dataverses/visus";

    fn visus() -> Address {
        Address::from_uri(VISUS, Some(ApiKey::new("secret"))).unwrap()
    }

    #[test]
    fn test_contents_is_appended() {
        let contents = visus().contents().unwrap();
        assert_eq!(
            contents.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/dataverses/visus/contents"
        );
    }

    #[test]
    fn test_datasets_base_drops_two_segments() {
        let base = visus().datasets_base().unwrap();
        assert_eq!(
            base.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/datasets"
        );
    }

    #[test]
    fn test_sibling_replaces_last_segment() {
        let child = visus().sibling("visus-child").unwrap();
        assert_eq!(
            child.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/dataverses/visus-child"
        );
    }

    #[test]
    fn test_dataset_of_listing() {
        let dataset = visus().dataset(42).unwrap();
        assert_eq!(
            dataset.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/datasets/42"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let address =
            Address::from_uri(&format!("{VISUS}/"), Some(ApiKey::new("secret"))).unwrap();
        assert_eq!(
            address.assignments().unwrap().uri().as_str(),
            "https://darus.uni-stuttgart.de/api/dataverses/visus/assignments"
        );
    }

    #[test]
    fn test_derive_keeps_credential() {
        let derived = visus().datasets_base().unwrap();
        assert_eq!(derived.credential().secret(), "secret");
    }

    #[test]
    fn test_derive_fails_with_insufficient_segments() {
        let root = Address::from_uri("https://example.org/api", Some(ApiKey::new("k"))).unwrap();
        let result = root.datasets_base();
        assert!(matches!(result, Err(DataverseError::Precondition(_))));
    }

    #[test]
    fn test_derive_rejects_segments_with_slashes() {
        let result = visus().sibling("a/b");
        assert!(matches!(result, Err(DataverseError::Precondition(_))));
    }

    #[test]
    fn test_derive_rejects_dot_segments() {
        let dataset = visus().dataset(7).unwrap();

        for segment in [".", ".."] {
            assert!(matches!(
                visus().sibling(segment),
                Err(DataverseError::Precondition(_))
            ));
            assert!(matches!(
                dataset.version_metadata(&DatasetVersion::Latest, Some(segment)),
                Err(DataverseError::Precondition(_))
            ));
        }
    }

    #[test]
    fn test_version_files_and_metadata() {
        let dataset = visus().dataset(7).unwrap();

        let files = dataset.version_files(&DatasetVersion::Latest).unwrap();
        assert_eq!(
            files.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/datasets/7/versions/:latest/files"
        );

        let block = dataset
            .version_metadata(&DatasetVersion::Version { major: 1, minor: 2 }, Some("citation"))
            .unwrap();
        assert_eq!(
            block.uri().as_str(),
            "https://darus.uni-stuttgart.de/api/datasets/7/versions/1.2/metadata/citation"
        );
    }

    #[test]
    fn test_persistent_id_query_survives_child_derivation_only() {
        let pid = Identifier::PersistentId("doi:10.5072/FK2/ABC".to_string());
        let dataset =
            Address::for_dataset("https://demo.dataverse.org", &pid, ApiKey::new("k")).unwrap();
        assert_eq!(
            dataset.uri().as_str(),
            "https://demo.dataverse.org/api/datasets/:persistentId?persistentId=doi%3A10.5072%2FFK2%2FABC"
        );

        let files = dataset.version_files(&DatasetVersion::Draft).unwrap();
        assert_eq!(files.uri().query(), dataset.uri().query());

        let sibling = dataset.sibling("9").unwrap();
        assert_eq!(sibling.uri().query(), None);
    }

    #[test]
    fn test_for_dataverse() {
        let address =
            Address::for_dataverse("https://demo.dataverse.org/", "root", ApiKey::new("k"))
                .unwrap();
        assert_eq!(
            address.uri().as_str(),
            "https://demo.dataverse.org/api/dataverses/root"
        );
    }

    #[test]
    fn test_resolve_from_uri_requires_credential() {
        let result = Address::resolve(None, Some(VISUS), None);
        assert!(matches!(result, Err(DataverseError::Precondition(_))));
    }

    #[test]
    fn test_resolve_from_handle_inherits_credential() {
        let handle = visus();
        let address = Address::resolve(Some(&handle), None, None).unwrap();
        assert_eq!(address, handle);
    }

    #[test]
    fn test_resolve_from_handle_with_explicit_credential() {
        let handle = visus();
        let address = Address::resolve(Some(&handle), None, Some(ApiKey::new("other"))).unwrap();
        assert_eq!(address.uri(), handle.uri());
        assert_eq!(address.credential().secret(), "other");
    }

    #[test]
    fn test_resolve_without_target_fails() {
        let result = Address::resolve(None, None, Some(ApiKey::new("k")));
        assert!(matches!(result, Err(DataverseError::Precondition(_))));

        let handle = visus();
        let result = Address::resolve(Some(&handle), Some(VISUS), None);
        assert!(matches!(result, Err(DataverseError::Precondition(_))));
    }

    #[test]
    fn test_resolve_rejects_invalid_uri() {
        let result = Address::resolve(None, Some("not a uri"), Some(ApiKey::new("k")));
        assert!(matches!(result, Err(DataverseError::Precondition(_))));
    }
}
