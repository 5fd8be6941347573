mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use fixtura_core::{AttributeMap, Record, Strategy, Value};
use fixtura_factory::{
    AssociationOptions, DefineOptions, FactoryError, Product, RegistryBuilder, RegistryConfig,
};

use support::{Post, User, blog_builder, blog_registry, counter};

#[test]
fn create_persists_post_and_its_author() {
    let registry = blog_registry(counter());

    let post = registry
        .create_as::<Post>("post", AttributeMap::new())
        .expect("post is created");

    assert!(post.persisted);
    let author = post.author_as::<User>().expect("author is a user");
    assert!(author.persisted);
    assert_eq!(author.name, "Billy Idol");
    assert_eq!(author.email, "billy.idol@example.com");
}

#[test]
fn build_persists_nothing() {
    let registry = blog_registry(counter());

    let post = registry
        .build_as::<Post>("post", AttributeMap::new())
        .expect("post is built");

    assert!(!post.persisted);
    let author = post.author_as::<User>().expect("author is built too");
    assert!(!author.persisted);
    assert_eq!(author.name, "Billy Idol");
}

#[test]
fn attributes_only_never_instantiates_associations() {
    let users_built = counter();
    let registry = blog_registry(Arc::clone(&users_built));

    let attrs = registry
        .attributes_for("post", AttributeMap::new())
        .expect("attributes resolve");

    assert_eq!(attrs.get("author"), Some(&Value::Null));
    assert_eq!(users_built.load(Ordering::SeqCst), 0);
}

#[test]
fn validation_failure_is_distinguishable() {
    let registry = blog_registry(counter());

    let err = registry
        .create("user", AttributeMap::new().with("name", ""))
        .expect_err("blank name fails validation");

    assert!(err.is_validation());
    let issues = err.validation_errors().expect("validation issues");
    assert_eq!(issues.on("name").count(), 1);

    let unknown = registry
        .create("ghost", AttributeMap::new())
        .expect_err("unknown blueprint");
    assert!(!unknown.is_validation());
}

#[test]
fn association_validation_failure_aborts_parent() {
    let mut builder = blog_builder();
    builder
        .define("user", DefineOptions::new(), |f| {
            f.value("name", "")?;
            Ok(())
        })
        .expect("define user");
    builder
        .define("post", DefineOptions::new(), |f| {
            f.association("author", AssociationOptions::new().factory("user"))?;
            Ok(())
        })
        .expect("define post");
    let registry = builder.freeze();

    let err = registry
        .create("post", AttributeMap::new())
        .expect_err("author cannot be saved");
    assert!(matches!(
        err,
        FactoryError::Validation { ref blueprint, .. } if blueprint == "user"
    ));

    registry
        .build("post", AttributeMap::new())
        .expect("build never validates");
}

#[test]
fn association_overrides_are_forwarded() {
    let mut builder = blog_builder();
    builder
        .define("user", DefineOptions::new(), |f| {
            f.value("name", "Billy Idol")?;
            f.value("admin", false)?;
            Ok(())
        })
        .expect("define user");
    builder
        .define("post", DefineOptions::new(), |f| {
            f.association(
                "author",
                AssociationOptions::new().factory("user").with("admin", true),
            )?;
            Ok(())
        })
        .expect("define post");
    let registry = builder.freeze();

    let post = registry
        .build_as::<Post>("post", AttributeMap::new())
        .expect("post builds");
    let author = post.author_as::<User>().expect("author");
    assert!(author.admin);
}

#[test]
fn association_name_defaults_to_attribute_name() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_model::<Record>("Owner")
        .expect("register Owner")
        .register_model::<Record>("Pet")
        .expect("register Pet");
    builder
        .define("owner", DefineOptions::new(), |f| {
            f.value("name", "Ada")?;
            Ok(())
        })
        .expect("define owner");
    builder
        .define("pet", DefineOptions::new(), |f| {
            f.association("owner", AssociationOptions::new())?;
            Ok(())
        })
        .expect("define pet");
    let registry = builder.freeze();

    let pet = registry
        .create_as::<Record>("pet", AttributeMap::new())
        .expect("pet is created");
    let owner = pet
        .get("owner")
        .and_then(Value::instance_as::<Record>)
        .expect("owner record");
    assert!(owner.is_persisted());
    assert_eq!(owner.get("name"), Some(&Value::from("Ada")));
    assert_eq!(
        pet.get("owner").map(Value::to_json),
        Some(serde_json::json!({"name": "Ada"}))
    );
}

#[test]
fn lazy_association_can_pass_overrides_from_siblings() {
    let mut builder = blog_builder();
    builder
        .define("user", DefineOptions::new(), |f| {
            f.value("name", "Billy Idol")?;
            Ok(())
        })
        .expect("define user");
    builder
        .define("post", DefineOptions::new(), |f| {
            f.value("title", "White Wedding")?;
            f.lazy("author", |ctx| {
                let title = ctx.require("title")?.as_str().unwrap_or_default().to_string();
                ctx.association_with("user", AttributeMap::new().with("email", title))
            })?;
            Ok(())
        })
        .expect("define post");
    let registry = builder.freeze();

    let post = registry
        .build_as::<Post>("post", AttributeMap::new())
        .expect("post builds");
    assert_eq!(post.author_as::<User>().expect("author").email, "White Wedding");
}

#[test]
fn unknown_association_fails_under_every_strategy() {
    let mut builder = blog_builder();
    builder
        .define("post", DefineOptions::new(), |f| {
            f.association("author", AssociationOptions::new().factory("writer"))?;
            Ok(())
        })
        .expect("declaring an association does not look it up");
    let registry = builder.freeze();

    for strategy in [Strategy::AttributesOnly, Strategy::Build, Strategy::Create] {
        let err = registry
            .run("post", strategy, AttributeMap::new())
            .expect_err("writer is not registered");
        assert!(matches!(err, FactoryError::UnknownBlueprint(ref name) if name == "writer"));
    }
}

#[test]
fn cyclic_associations_hit_the_depth_limit() {
    let config = RegistryConfig {
        max_association_depth: 3,
        ..RegistryConfig::default()
    };
    let mut builder = RegistryBuilder::with_config(config).expect("valid config");
    builder
        .register_model::<Record>("Node")
        .expect("register Node");
    builder
        .define("node", DefineOptions::new(), |f| {
            f.association("next", AssociationOptions::new().factory("node"))?;
            Ok(())
        })
        .expect("define node");
    let registry = builder.freeze();

    let err = registry
        .build("node", AttributeMap::new())
        .expect_err("endless chain");
    assert!(matches!(
        err,
        FactoryError::AssociationDepthExceeded { limit: 3, .. }
    ));

    let attrs = registry
        .attributes_for("node", AttributeMap::new())
        .expect("attributes_only does not recurse");
    assert_eq!(attrs.get("next"), Some(&Value::Null));
}

#[test]
fn run_dispatches_on_strategy() {
    let registry = blog_registry(counter());

    let attrs = registry
        .run("user", Strategy::AttributesOnly, AttributeMap::new())
        .expect("attributes")
        .into_attributes()
        .expect("attribute product");
    assert_eq!(attrs.get("name"), Some(&Value::from("Billy Idol")));

    let product = registry
        .run("user", Strategy::Create, AttributeMap::new())
        .expect("create");
    assert!(matches!(product, Product::Instance(_)));
    let user = product.into_instance().expect("instance");
    assert!(user.downcast_ref::<User>().expect("user").persisted);
}

#[test]
fn typed_retrieval_reports_mismatch() {
    let registry = blog_registry(counter());

    let err = registry
        .build_as::<Post>("user", AttributeMap::new())
        .expect_err("user blueprint builds users");
    assert!(matches!(
        err,
        FactoryError::ModelTypeMismatch { ref blueprint, .. } if blueprint == "user"
    ));
}

#[test]
fn unknown_field_surfaces_as_field_error() {
    let registry = blog_registry(counter());

    let err = registry
        .build("user", AttributeMap::new().with("nickname", "Billy"))
        .expect_err("users have no nickname");
    assert!(matches!(err, FactoryError::Field { .. }));

    let attrs = registry
        .attributes_for("user", AttributeMap::new().with("nickname", "Billy"))
        .expect("attributes_only never assigns");
    assert_eq!(attrs.get("nickname"), Some(&Value::from("Billy")));
}
