//! Declares a small blog registry and prints what each strategy produces.
//!
//! Run with `RUST_LOG=fixtura_factory=trace` to watch attributes resolve.

use fixtura_core::{AttributeMap, Model, Record, Value};
use fixtura_factory::logging::{LogFormat, init_logging};
use fixtura_factory::{AssociationOptions, DefineOptions, FactoryError, RegistryBuilder};

fn main() -> Result<(), FactoryError> {
    init_logging(LogFormat::Text)?;

    let mut builder = RegistryBuilder::new();
    builder
        .register_model::<Record>("User")?
        .register_model::<Record>("Post")?
        .sequence("email", |n| Value::from(format!("person{n}@example.com")))?;

    builder.define("user", DefineOptions::new(), |f| {
        f.value("name", "Billy Idol")?;
        f.lazy("email", |ctx| ctx.sequence("email"))?;
        Ok(())
    })?;
    builder.define("post", DefineOptions::new(), |f| {
        f.value("title", "Rebel Yell")?;
        f.association("author", AssociationOptions::new().factory("user"))?;
        Ok(())
    })?;
    let registry = builder.freeze();

    let attrs = registry.attributes_for("post", AttributeMap::new())?;
    println!("attributes_for: {}", attrs.to_json());

    let post = registry.build_as::<Record>("post", AttributeMap::new())?;
    println!("build: {} (persisted: {})", post.to_json(), post.is_persisted());

    let post = registry.create_as::<Record>(
        "post",
        AttributeMap::new().with("title", "White Wedding"),
    )?;
    println!("create: {} (persisted: {})", post.to_json(), post.is_persisted());

    Ok(())
}
