use serde::{de::DeserializeOwned, Serialize};
use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to encode JSON")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode JSON")]
    Decode(#[source] serde_json::Error),
}

/// Writes the JSON encoding of `object` to `writer`.
pub fn marshal<T, W>(object: &T, writer: W) -> Result<(), Error>
where
    T: Serialize,
    W: io::Write,
{
    serde_json::to_writer(writer, object).map_err(Error::Encode)
}

pub fn marshal_to_string<T: Serialize>(object: &T) -> Result<String, Error> {
    serde_json::to_string(object).map_err(Error::Encode)
}

/// Writes a JSON array holding the encoding of each of `objects`.
pub fn marshal_list<T, W>(objects: &[T], writer: W) -> Result<(), Error>
where
    T: Serialize,
    W: io::Write,
{
    serde_json::to_writer(writer, objects).map_err(Error::Encode)
}

/// Reads an object from the JSON document of `reader`.
pub fn unmarshal<T, R>(reader: R) -> Result<T, Error>
where
    T: DeserializeOwned,
    R: io::Read,
{
    serde_json::from_reader(reader).map_err(Error::Decode)
}

pub fn unmarshal_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(Error::Decode)
}

pub fn unmarshal_str<T: DeserializeOwned>(s: &str) -> Result<T, Error> {
    serde_json::from_str(s).map_err(Error::Decode)
}

/// Reads a JSON array of objects from `reader`. A JSON `null` reads as no objects.
pub fn unmarshal_list<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let objects: Option<Vec<T>> = serde_json::from_reader(reader).map_err(Error::Decode)?;
    Ok(objects.unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cluster, ClusterState, Label};

    #[test]
    fn test_writer_and_reader() {
        let cluster = Cluster::builder()
            .id("123")
            .name("c")
            .state(ClusterState::Other("new_state".to_string()))
            .build();

        let mut buf = Vec::new();
        marshal(&cluster, &mut buf).unwrap();
        assert_eq!(
            std::str::from_utf8(&buf).unwrap(),
            r#"{"kind":"Cluster","id":"123","name":"c","state":"new_state"}"#
        );
        assert_eq!(unmarshal::<Cluster, _>(buf.as_slice()).unwrap(), cluster);
        assert_eq!(unmarshal_slice::<Cluster>(&buf).unwrap(), cluster);
        assert_eq!(
            unmarshal_str::<Cluster>(&marshal_to_string(&cluster).unwrap()).unwrap(),
            cluster
        );
    }

    #[test]
    fn test_lists() {
        let labels = vec![
            Label::builder().key("a").value("1").build(),
            Label::builder().key("b").internal(true).build(),
        ];
        let mut buf = Vec::new();
        marshal_list(&labels, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            r#"[{"kind":"Label","key":"a","value":"1"},{"kind":"Label","internal":true,"key":"b"}]"#
        );
        assert_eq!(unmarshal_list::<Label, _>(buf.as_slice()).unwrap(), labels);
        assert!(unmarshal_list::<Label, _>("null".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_errors() {
        let err = unmarshal_str::<Cluster>(r#"{"kind": "Cluster", "multi_az": "yes"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.to_string(), "failed to decode JSON");

        let err = unmarshal_str::<Cluster>("[]").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
