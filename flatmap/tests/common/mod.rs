//! Shared models for the integration tests
//!
//! The father/son graph uses PascalCase member names; the order graph uses the
//! default snake_case convention.

#![allow(dead_code, reason = "each test binary uses a subset of the models")]

use flatmap::{Describe, MapperConfig, NamingConvention};
use serde::{Deserialize, Serialize};

pub fn pascal_config() -> MapperConfig {
    MapperConfig::default().with_naming(NamingConvention::PascalCase)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Grandson {
    pub my_string: Option<String>,
    pub my_int:    i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Son {
    pub my_string: Option<String>,
    pub my_int:    i32,
    pub grandson:  Option<Grandson>,
}

impl Son {
    pub fn named(name: &str) -> Self {
        Self {
            my_string: Some(name.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Father {
    pub my_string: Option<String>,
    pub my_int:    i32,
    pub son:       Option<Son>,
}

impl Father {
    pub fn create_one() -> Self {
        Self {
            my_string: Some("Father".to_string()),
            my_int:    1,
            son:       Some(Son {
                my_string: Some("Son".to_string()),
                my_int:    2,
                grandson:  Some(Grandson {
                    my_string: Some("Grandson".to_string()),
                    my_int:    3,
                }),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenFatherSonGrandsonDto {
    pub my_string:              Option<String>,
    pub my_int:                 i32,
    pub son_my_string:          Option<String>,
    pub son_my_int:             i32,
    pub son_grandson_my_string: Option<String>,
    pub son_grandson_my_int:    i32,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FatherSons {
    pub my_string: Option<String>,
    pub my_int:    i32,
    pub sons:      Option<Vec<Son>>,
}

impl FatherSons {
    pub fn create_one() -> Self {
        Self {
            my_string: Some("Father".to_string()),
            my_int:    1,
            sons:      Some(
                ["Son", "Son2", "Son3", "Son4", "Son5"]
                    .into_iter()
                    .map(Son::named)
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenFatherSonsCountDto {
    pub my_string:  Option<String>,
    pub sons_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenFatherSonsCountBadDto {
    pub my_string:  Option<String>,
    pub sons_count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenLinqCollectionMethodsDto {
    pub sons_any:              bool,
    pub sons_count:            i32,
    pub sons_long_count:       i64,
    pub sons_first_or_default: Option<Son>,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenCircularReference {
    pub my_string:    Option<String>,
    pub son:          Option<Son>,
    pub circular_ref: Option<Box<FlattenCircularReference>>,
}

impl FlattenCircularReference {
    pub fn create_one() -> Self {
        Self {
            my_string:    Some("Outer".to_string()),
            son:          Some(Son::named("Son")),
            circular_ref: Some(Box::new(Self {
                my_string:    Some("Inner".to_string()),
                son:          None,
                circular_ref: None,
            })),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenCircularReferenceDto {
    pub my_string:              Option<String>,
    pub son_my_string:          Option<String>,
    pub circular_ref_my_string: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
pub struct Customer {
    pub name:    String,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
pub struct Address {
    pub city: String,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
pub struct Line {
    pub sku:      String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
pub struct Order {
    pub id:       u64,
    pub customer: Option<Customer>,
    pub lines:    Vec<Line>,
    #[describe(skip)]
    #[serde(skip)]
    pub scratch:  Vec<u8>,
}

impl Order {
    pub fn create_one() -> Self {
        Self {
            id:       7,
            customer: Some(Customer {
                name:    "Ada".to_string(),
                address: Some(Address {
                    city: "London".to_string(),
                }),
            }),
            lines:    vec![
                Line {
                    sku:      "tea".to_string(),
                    quantity: 2,
                },
                Line {
                    sku:      "scone".to_string(),
                    quantity: 6,
                },
            ],
            scratch:  Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
pub struct OrderSummary {
    pub id:                    u64,
    pub customer_name:         String,
    pub customer_address_city: String,
    pub lines_count:           usize,
    pub lines_any:             bool,
    pub lines_quantity:        Vec<u32>,
    #[describe(rename = "note")]
    #[serde(rename = "note")]
    pub remark:                String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
pub struct OrderSummaryBadDto {
    pub id:          u64,
    pub lines_count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenSonsGrandsonDto {
    pub sons_grandson_my_int:    Vec<i32>,
    pub sons_grandson_my_string: Vec<Option<String>>,
    pub sons_grandson:           Vec<Grandson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenSonsElementMismatchDto {
    pub sons_my_int: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenSonsFirstOrDefaultMismatchDto {
    pub sons_first_or_default: Option<Invoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct SonSummary {
    pub my_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenSonSummariesDto {
    pub sons:                  Vec<SonSummary>,
    pub sons_first_or_default: Option<SonSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenOverrideDefaultsDto {
    pub my_string:     Option<String>,
    pub son_my_string: Option<String>,
}

impl Default for FlattenOverrideDefaultsDto {
    fn default() -> Self {
        Self {
            my_string:     Some("unset".to_string()),
            son_my_string: Some("no son".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct TreeNode {
    pub name:     String,
    pub parent:   Option<Box<TreeNode>>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// A node with one child whose parent has three children
    pub fn create_one() -> Self {
        let parent = Self {
            name:     "Root".to_string(),
            parent:   None,
            children: ["A", "B", "C"].into_iter().map(Self::leaf).collect(),
        };
        Self {
            name:     "Child".to_string(),
            parent:   Some(Box::new(parent)),
            children: vec![Self::leaf("Grandchild")],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenTreeNodeDto {
    pub name:                  String,
    pub parent_name:           Option<String>,
    pub parent_children_count: i32,
    pub parent_children_name:  Vec<String>,
    pub children_count:        i32,
    pub children_name:         Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Describe)]
#[describe(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct FlattenTreeNodeGrandparentDto {
    pub parent_parent_name: Option<String>,
}
