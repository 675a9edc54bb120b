//! TensorFlow `Example` and `SequenceExample` messages
//!
//! Wire-compatible declarations of `tensorflow/core/example/{feature,example}.proto`.
//! Maps use `BTreeMap` so serialized output is ordered by feature name.

use serde::Serialize;
use std::collections::BTreeMap;

/// List of byte strings
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct BytesList {
    /// Values
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub value: Vec<Vec<u8>>,
}

/// Packed list of floats
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct FloatList {
    /// Values
    #[prost(float, repeated, tag = "1")]
    pub value: Vec<f32>,
}

/// Packed list of signed 64-bit integers
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Int64List {
    /// Values
    #[prost(int64, repeated, tag = "1")]
    pub value: Vec<i64>,
}

/// One feature: a typed list of values
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Feature {
    /// Value list, absent for an empty feature
    #[prost(oneof = "feature::Kind", tags = "1, 2, 3")]
    pub kind: Option<feature::Kind>,
}

/// Nested types for [`Feature`]
pub mod feature {
    use serde::Serialize;

    /// The value list carried by a feature
    #[derive(Clone, PartialEq, prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Kind {
        /// Byte strings
        #[prost(message, tag = "1")]
        BytesList(super::BytesList),
        /// Floats
        #[prost(message, tag = "2")]
        FloatList(super::FloatList),
        /// 64-bit integers
        #[prost(message, tag = "3")]
        Int64List(super::Int64List),
    }
}

impl Feature {
    /// Feature holding byte strings
    pub fn bytes<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            kind: Some(feature::Kind::BytesList(BytesList {
                value: values.into_iter().map(Into::into).collect(),
            })),
        }
    }

    /// Feature holding floats
    pub fn floats(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            kind: Some(feature::Kind::FloatList(FloatList {
                value: values.into_iter().collect(),
            })),
        }
    }

    /// Feature holding 64-bit integers
    pub fn int64s(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            kind: Some(feature::Kind::Int64List(Int64List {
                value: values.into_iter().collect(),
            })),
        }
    }

    /// Byte string values, if this is a bytes feature
    pub fn as_bytes_list(&self) -> Option<&[Vec<u8>]> {
        match &self.kind {
            Some(feature::Kind::BytesList(list)) => Some(&list.value),
            _ => None,
        }
    }

    /// Float values, if this is a float feature
    pub fn as_float_list(&self) -> Option<&[f32]> {
        match &self.kind {
            Some(feature::Kind::FloatList(list)) => Some(&list.value),
            _ => None,
        }
    }

    /// Integer values, if this is an int64 feature
    pub fn as_int64_list(&self) -> Option<&[i64]> {
        match &self.kind {
            Some(feature::Kind::Int64List(list)) => Some(&list.value),
            _ => None,
        }
    }
}

/// Named features
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Features {
    /// Feature name to feature
    #[prost(btree_map = "string, message", tag = "1")]
    pub feature: BTreeMap<String, Feature>,
}

impl<K: Into<String>> FromIterator<(K, Feature)> for Features {
    fn from_iter<T: IntoIterator<Item = (K, Feature)>>(iter: T) -> Self {
        Self {
            feature: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Ordered list of features, one per time step
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct FeatureList {
    /// Steps
    #[prost(message, repeated, tag = "1")]
    pub feature: Vec<Feature>,
}

/// Named feature lists
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct FeatureLists {
    /// Feature list name to feature list
    #[prost(btree_map = "string, message", tag = "1")]
    pub feature_list: BTreeMap<String, FeatureList>,
}

/// Flat message: one set of named features
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Example {
    /// Features
    #[prost(message, optional, tag = "1")]
    pub features: Option<Features>,
}

impl Example {
    /// Example built from named features
    pub fn from_features<K, I>(features: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Feature)>,
    {
        Self {
            features: Some(features.into_iter().collect()),
        }
    }

    /// Look up a feature by name
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.as_ref()?.feature.get(name)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.as_ref().map_or(0, |f| f.feature.len())
    }

    /// Whether the example has no features
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sequential message: context features plus per-step feature lists
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct SequenceExample {
    /// Features shared by every step
    #[prost(message, optional, tag = "1")]
    pub context: Option<Features>,

    /// Per-step features
    #[prost(message, optional, tag = "2")]
    pub feature_lists: Option<FeatureLists>,
}

impl SequenceExample {
    /// Look up a context feature by name
    pub fn context_feature(&self, name: &str) -> Option<&Feature> {
        self.context.as_ref()?.feature.get(name)
    }

    /// Look up a feature list by name
    pub fn feature_list(&self, name: &str) -> Option<&FeatureList> {
        self.feature_lists.as_ref()?.feature_list.get(name)
    }

    /// Whether neither context nor feature lists carry anything
    pub fn is_empty(&self) -> bool {
        self.context.as_ref().map_or(true, |c| c.feature.is_empty())
            && self
                .feature_lists
                .as_ref()
                .map_or(true, |l| l.feature_list.is_empty())
    }
}
