//! JSON:API document encoding and decoding
//!
//! Resource types implement [`Resource`]; their serde representation is the
//! `attributes` object, while the primary `id` and any relationships are
//! carried by the trait. This keeps `None` attributes out of request bodies so
//! partial updates never clear server-side values.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Media type for every request and response body.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// A typed JSON:API resource.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// The JSON:API `type` member (e.g. `api-keys`)
    const TYPE: &'static str;

    /// Primary identifier; empty before the server assigns one.
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// To-one relationships to send with the resource.
    fn relationships(&self) -> BTreeMap<String, Relationship> {
        BTreeMap::new()
    }

    /// Populate relationship fields from a decoded resource object.
    /// `included` holds any side-loaded resources of the document.
    fn link(&mut self, _relationships: &BTreeMap<String, Relationship>, _included: &[ResourceObject]) {}
}

/// `{ "type": ..., "id": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// A to-one relationship; `data: null` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

impl Relationship {
    pub fn to(kind: &str, id: &str) -> Self {
        Self {
            data: Some(ResourceIdentifier {
                kind: kind.to_string(),
                id: id.to_string(),
            }),
        }
    }
}

/// Untyped resource object as found in `data` and `included`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

impl ResourceObject {
    /// Encode a typed resource. Side-loaded resources are never emitted.
    pub fn encode<R: Resource>(resource: &R) -> Result<Self> {
        let attributes = match serde_json::to_value(resource)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::Decode(format!(
                    "{} attributes must serialize to an object, got {}",
                    R::TYPE,
                    other
                )));
            }
        };

        Ok(Self {
            kind: R::TYPE.to_string(),
            id: Some(resource.id().to_string()).filter(|id| !id.is_empty()),
            attributes,
            relationships: resource.relationships(),
        })
    }

    /// Decode into a typed resource, checking the `type` member.
    pub fn decode<R: Resource>(self, included: &[ResourceObject]) -> Result<R> {
        if self.kind != R::TYPE {
            return Err(Error::Decode(format!(
                "expected resource of type '{}', got '{}'",
                R::TYPE,
                self.kind
            )));
        }

        let mut resource: R = serde_json::from_value(Value::Object(self.attributes))?;
        if let Some(id) = self.id {
            resource.set_id(id);
        }
        resource.link(&self.relationships, included);
        Ok(resource)
    }

    /// Find the side-loaded resource a relationship points to.
    pub fn find<'a>(
        included: &'a [ResourceObject],
        identifier: &ResourceIdentifier,
    ) -> Option<&'a ResourceObject> {
        included
            .iter()
            .find(|obj| obj.kind == identifier.kind && obj.id.as_deref() == Some(&identifier.id))
    }
}

/// Top-level `links` member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationLinks {
    #[serde(default)]
    pub next: Option<String>,
}

/// A JSON:API document whose `data` is `D`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<D> {
    pub data: D,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,

    #[serde(default, skip_serializing)]
    pub links: Option<PaginationLinks>,
}

/// Serialize a resource as a single-resource request payload.
pub fn marshal_payload<R: Resource>(resource: &R) -> Result<Vec<u8>> {
    let document = Document {
        data: ResourceObject::encode(resource)?,
        included: Vec::new(),
        links: None,
    };
    Ok(serde_json::to_vec(&document)?)
}

/// Decode a single-resource payload.
pub fn unmarshal_payload<R: Resource>(body: &[u8]) -> Result<R> {
    let document: Document<ResourceObject> = serde_json::from_slice(body)?;
    document.data.decode(&document.included)
}

/// Decode a collection payload along with its pagination links.
pub fn unmarshal_many_payload<R: Resource>(body: &[u8]) -> Result<(Vec<R>, PaginationLinks)> {
    let document: Document<Vec<ResourceObject>> = serde_json::from_slice(body)?;
    let included = document.included;
    let items = document
        .data
        .into_iter()
        .map(|obj| obj.decode(&included))
        .collect::<Result<Vec<R>>>()?;
    Ok((items, document.links.unwrap_or_default()))
}
