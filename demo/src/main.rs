//! # flatmap demo
//!
//! Maps a small father/son graph onto a flattened DTO and prints the compiled plan
//! along with the mapped values. Set `RUST_LOG=flatmap=debug` to watch resolution.

use error_stack::Report;
use flatmap::{Describe, Mapper, MapperConfig, Registration};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const CONFIG: &str = r#"{ "naming": "snake_case", "flatten_by_default": false }"#;

#[derive(Debug, Default, Serialize, Describe)]
struct Grandson {
    my_string: Option<String>,
    my_int:    i32,
}

#[derive(Debug, Default, Serialize, Describe)]
struct Son {
    my_string: Option<String>,
    my_int:    i32,
    grandson:  Option<Grandson>,
}

#[derive(Debug, Default, Serialize, Describe)]
struct Father {
    my_string: Option<String>,
    my_int:    i32,
    son:       Option<Son>,
    sons:      Vec<Son>,
}

#[derive(Debug, Default, Serialize, Deserialize, Describe)]
struct FatherDto {
    my_string:             Option<String>,
    son_my_string:         Option<String>,
    son_grandson_my_int:   i32,
    sons_count:            usize,
    sons_any:              bool,
    sons_my_int:           Vec<i32>,
    sons_first_or_default: Option<serde_json::Value>,
    display_name:          String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    Registry::default().with(filter).with(stderr_layer).init();
}

fn father() -> Father {
    let son = |name: &str, int: i32| Son {
        my_string: Some(name.to_string()),
        my_int:    int,
        grandson:  Some(Grandson {
            my_string: Some(format!("{name}'s son")),
            my_int:    int * 10,
        }),
    };

    Father {
        my_string: Some("Father".to_string()),
        my_int:    1,
        son:       Some(son("Son", 2)),
        sons:      vec![son("Abel", 3), son("Seth", 4)],
    }
}

fn to_pretty<T: Serialize>(value: &T) -> flatmap::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Report::new(flatmap::Error::serialization_failed("demo output", e)))
}

fn main() -> flatmap::Result<()> {
    init_tracing();

    let mut mapper = Mapper::with_config(MapperConfig::from_json_str(CONFIG)?);
    mapper.register(
        Registration::<Father, FatherDto>::new()
            .flatten_source()
            .member("display_name", |father: &Father| {
                let name = father.my_string.as_deref().unwrap_or("?");
                format!("{name} with {} sons", father.sons.len())
            }),
    );
    mapper.compile()?;

    let plan = mapper.mapping::<Father, FatherDto>()?.plan();
    println!("plan:\n{}", to_pretty(&plan)?);

    let dto: FatherDto = mapper.map(&father())?;
    println!("mapped:\n{}", to_pretty(&dto)?);

    let orphan: FatherDto = mapper.map(&Father::default())?;
    println!("mapped without sons:\n{}", to_pretty(&orphan)?);

    info!(mapper = ?mapper, "Demo finished");
    Ok(())
}
