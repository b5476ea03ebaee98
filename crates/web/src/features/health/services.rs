use storage::{Database, error::Result};

pub async fn check(db: &Database) -> Result<()> {
    db.ping().await
}
