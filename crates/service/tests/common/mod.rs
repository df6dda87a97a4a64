//! Shared fixtures for service integration tests.

use sqlx::PgPool;

use plantarium_db::models::plant::CreatePlant;
use plantarium_db::models::user::CreateUser;
use plantarium_db::repositories::{PlantRepo, UserRepo};
use plantarium_service::events::PhotoUpload;
use plantarium_store::AssetStore;

/// A user and one of their plants, the minimum fixture for event tests.
pub struct Fixture {
    pub user_id: i64,
    pub plant_id: i64,
}

pub async fn fixture(pool: &PgPool) -> Fixture {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
        },
    )
    .await
    .unwrap();

    let plant = PlantRepo::create(
        pool,
        &CreatePlant {
            user_id: user.id,
            location_id: None,
            name: "Monstera".to_string(),
            species: Some("Monstera deliciosa".to_string()),
            planted_date: None,
            notes: None,
            photo_ref: None,
        },
    )
    .await
    .unwrap();

    Fixture {
        user_id: user.id,
        plant_id: plant.id,
    }
}

/// Asset store rooted in a fresh temp directory.
pub fn temp_store() -> (tempfile::TempDir, AssetStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = AssetStore::new(dir.path());
    (dir, store)
}

pub fn upload(filename: &str) -> PhotoUpload {
    PhotoUpload {
        filename: filename.to_string(),
        bytes: b"image bytes".to_vec(),
    }
}

/// Count the regular files below a directory, recursively.
pub fn file_count(dir: &std::path::Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    let mut count = 0;
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                count += 1;
            }
        }
    }
    count
}
