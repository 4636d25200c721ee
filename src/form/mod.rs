//! Dashboard form state.
//!
//! A form holds one typed record. Every edit is a `FormAction` fed through
//! `reduce`, which returns the next record and leaves the previous one
//! untouched. Submission strips blank sub-records and packages the record
//! with its file selections as a multipart `Submission`.

mod action;
mod controller;
mod items;
mod records;

pub use action::{reduce, FormAction, FormError, ListPath};
pub use controller::{FormController, FormMode, Notice, Notifier, SubmitError};
pub use items::{FormItem, ItemField, ItemList, ListMut};
pub use records::{
    BlogField, BlogList, ClassField, ClassList, FormRecord, MetaField, QawwalField, QawwalList,
    SingerField, SingerList,
};
