// Vitals Tracker API
//
// HTTP surface for the Vitals Tracker service: routes, handlers,
// public request/response entities and the OpenAPI document.

pub mod api;
pub mod entities;
pub mod openapi;
