use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{RoomId, UserId},
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::room::RoomRow, ConnectionPool};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

const ROOM_COLUMNS: &str = r#"
    r.room_id,
    r.name,
    r.description,
    r.price_per_night,
    r.hotel_name,
    r.address,
    r.city,
    r.capacity,
    r.amenities,
    r.image_url,
    r.owned_by,
    u.user_name AS owner_name
"#;

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom, owner_id: UserId) -> AppResult<RoomId> {
        let room_id = RoomId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO rooms
                (room_id, name, description, price_per_night,
                hotel_name, address, city, capacity, amenities, image_url, owned_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(room_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price_per_night)
        .bind(&event.hotel_name)
        .bind(&event.address)
        .bind(&event.city)
        .bind(event.capacity)
        .bind(&event.amenities)
        .bind(&event.image_url)
        .bind(owner_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been created".into(),
            ));
        }

        Ok(room_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            r#"
                SELECT {ROOM_COLUMNS}
                FROM rooms AS r
                INNER JOIN users AS u ON r.owned_by = u.user_id
                ORDER BY r.created_at DESC
            "#
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(&format!(
            r#"
                SELECT {ROOM_COLUMNS}
                FROM rooms AS r
                INNER JOIN users AS u ON r.owned_by = u.user_id
                WHERE r.room_id = $1
            "#
        ))
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            r#"
                SELECT {ROOM_COLUMNS}
                FROM rooms AS r
                INNER JOIN users AS u ON r.owned_by = u.user_id
                WHERE r.owned_by = $1
                ORDER BY r.created_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        // 所有者の検査と更新を同一トランザクションで行う
        let mut tx = self.db.begin().await?;

        self.verify_ownership(&mut tx, event.room_id, event.requested_user)
            .await?;

        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    price_per_night = COALESCE($4, price_per_night),
                    hotel_name = COALESCE($5, hotel_name),
                    address = COALESCE($6, address),
                    city = COALESCE($7, city),
                    capacity = COALESCE($8, capacity),
                    amenities = COALESCE($9, amenities),
                    image_url = COALESCE($10, image_url)
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price_per_night)
        .bind(&event.hotel_name)
        .bind(&event.address)
        .bind(&event.city)
        .bind(event.capacity)
        .bind(&event.amenities)
        .bind(&event.image_url)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.verify_ownership(&mut tx, event.room_id, event.requested_user)
            .await?;

        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(event.room_id)
            .execute(&mut *tx)
            .await;

        match res {
            Ok(r) if r.rows_affected() < 1 => {
                return Err(AppError::NoRowsAffectedError(
                    "No room record has been deleted".into(),
                ));
            }
            Ok(_) => {}
            // 予約レコードが残っている客室は外部キー制約で削除できない。
            // 売上履歴を保全するため、業務エラーとして呼び出し元へ返す
            Err(e)
                if e.as_database_error()
                    .map(|db_err| db_err.is_foreign_key_violation())
                    .unwrap_or(false) =>
            {
                return Err(AppError::UnprocessableEntity(format!(
                    "客室（{}）には予約が存在するため削除できません",
                    event.room_id
                )));
            }
            Err(e) => return Err(AppError::SpecificOperationError(e)),
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl RoomRepositoryImpl {
    // 客室の存在と所有者の一致を調べる。
    // 存在しなければ EntityNotFound、所有者が異なれば ForbiddenOperation
    async fn verify_ownership(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let owned_by: Option<(UserId,)> =
            sqlx::query_as("SELECT owned_by FROM rooms WHERE room_id = $1")
                .bind(room_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        match owned_by {
            None => Err(AppError::EntityNotFound(format!(
                "客室（{room_id}）が見つかりませんでした"
            ))),
            Some((owner_id,)) if owner_id != requested_user => Err(AppError::ForbiddenOperation),
            Some(_) => Ok(()),
        }
    }
}
