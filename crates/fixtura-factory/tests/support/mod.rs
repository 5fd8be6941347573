#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use fixtura_core::{FieldError, Model, ValidationErrors, Value};
use fixtura_factory::{AssociationOptions, DefineOptions, Registry, RegistryBuilder};

#[derive(Debug, Default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub persisted: bool,
}

impl Model for User {
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "name" => self.name = text(name, &value)?,
            "email" => self.email = text(name, &value)?,
            "admin" => {
                self.admin = value
                    .as_bool()
                    .ok_or_else(|| FieldError::mismatch(name, "bool", value.kind()))?
            }
            _ => return Err(FieldError::unknown(name)),
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), ValidationErrors> {
        if self.name.is_empty() {
            return Err(ValidationErrors::single("name", "can't be blank"));
        }
        self.persisted = true;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        json!({"name": self.name, "email": self.email, "admin": self.admin})
    }
}

#[derive(Debug, Default)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub author: Option<Arc<dyn Model>>,
    pub author_id: Option<i64>,
    pub persisted: bool,
}

impl Post {
    pub fn author_as<T: Model>(&self) -> Option<&T> {
        self.author.as_ref()?.downcast_ref::<T>()
    }
}

impl Model for Post {
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "title" => self.title = text(name, &value)?,
            "body" => self.body = text(name, &value)?,
            "author" => {
                self.author = match value {
                    Value::Instance(author) => Some(author),
                    Value::Null => None,
                    other => return Err(FieldError::mismatch(name, "instance", other.kind())),
                }
            }
            "author_id" => {
                self.author_id = Some(
                    value
                        .as_i64()
                        .ok_or_else(|| FieldError::mismatch(name, "int", value.kind()))?,
                )
            }
            _ => return Err(FieldError::unknown(name)),
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), ValidationErrors> {
        self.persisted = true;
        Ok(())
    }
}

fn text(field: &str, value: &Value) -> Result<String, FieldError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::mismatch(field, "text", value.kind()))
}

/// Builder with `User` and `Post` classes registered.
pub fn blog_builder() -> RegistryBuilder {
    fixtura_factory::logging::init_test_logging();
    let mut builder = RegistryBuilder::new();
    builder
        .register_model::<User>("User")
        .expect("register User")
        .register_model::<Post>("Post")
        .expect("register Post");
    builder
}

/// `user` and `post` blueprints. Every `user` evaluation bumps `users_built`.
pub fn blog_registry(users_built: Arc<AtomicUsize>) -> Registry {
    let mut builder = blog_builder();
    builder
        .define("user", DefineOptions::new(), move |f| {
            let users_built = Arc::clone(&users_built);
            f.lazy("name", move |_| {
                users_built.fetch_add(1, Ordering::SeqCst);
                Ok("Billy Idol")
            })?;
            f.lazy("email", |ctx| {
                let name = ctx.require("name")?.as_str().unwrap_or_default();
                Ok(format!("{}@example.com", name.to_lowercase().replace(' ', ".")))
            })?;
            Ok(())
        })
        .expect("define user");
    builder
        .define("post", DefineOptions::new(), |f| {
            f.value("title", "Rebel Yell")?;
            f.association("author", AssociationOptions::new().factory("user"))?;
            f.lazy("body", |ctx| {
                let title = ctx.get("title").and_then(Value::as_str).unwrap_or("untitled");
                Ok(format!("All about {title}"))
            })?;
            Ok(())
        })
        .expect("define post");
    builder.freeze()
}

pub fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}
