use crate::{db::OrmConn, schema::ProductSchema};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub schema: ProductSchema,
}

impl AppState {
    pub fn new(orm: OrmConn) -> Self {
        Self {
            orm,
            schema: ProductSchema::new(),
        }
    }
}
