use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::config_block::{Datasource, Generator};
use super::enumeration::Enum;
use super::model::Model;

/// A top-level element of a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum Block {
    Comment(Comment),
    Datasource(Datasource),
    Generator(Generator),
    Model(Model),
    Enum(Enum),
    /// A blank line separating groups of blocks.
    Break,
}

impl Block {
    /// The block keyword, or `None` for comments and blank lines.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Datasource(_) => Some("datasource"),
            Self::Generator(_) => Some("generator"),
            Self::Model(_) => Some("model"),
            Self::Enum(_) => Some("enum"),
            Self::Comment(_) | Self::Break => None,
        }
    }

    /// The declared name, or `None` for comments and blank lines.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Datasource(b) => Some(b.name.as_str()),
            Self::Generator(b) => Some(b.name.as_str()),
            Self::Model(b) => Some(b.name.as_str()),
            Self::Enum(b) => Some(b.name.as_str()),
            Self::Comment(_) | Self::Break => None,
        }
    }
}

/// A parsed schema file: its blocks in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    pub list: Vec<Block>,
}

impl Schema {
    pub fn new(list: Vec<Block>) -> Self {
        Self { list }
    }

    /// Looks up any named block (datasource, generator, model, enum).
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.list.iter().find(|b| b.name() == Some(name))
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.list.iter().filter_map(|b| match b {
            Block::Model(m) => Some(m),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.list.iter().filter_map(|b| match b {
            Block::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn datasources(&self) -> impl Iterator<Item = &Datasource> {
        self.list.iter().filter_map(|b| match b {
            Block::Datasource(d) => Some(d),
            _ => None,
        })
    }

    pub fn generators(&self) -> impl Iterator<Item = &Generator> {
        self.list.iter().filter_map(|b| match b {
            Block::Generator(g) => Some(g),
            _ => None,
        })
    }

    /// Looks up a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models().find(|m| m.name == name)
    }

    /// Looks up an enum by name.
    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums().find(|e| e.name == name)
    }

    /// Looks up a datasource by name.
    pub fn datasource(&self, name: &str) -> Option<&Datasource> {
        self.datasources().find(|d| d.name == name)
    }

    /// Looks up a generator by name.
    pub fn generator(&self, name: &str) -> Option<&Generator> {
        self.generators().find(|g| g.name == name)
    }
}
