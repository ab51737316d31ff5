pub mod delete;

use std::sync::Arc;

use crate::errors::Result;
use crate::storage::Storage;

pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 删除用户及其关联数据
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        delete::delete_user(self, user_id).await
    }
}
