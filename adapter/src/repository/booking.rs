use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::CreateBooking, stay::StayRange, Booking, BookingStatus, CreatedBooking,
        OwnerSummary, PaymentStatus,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::booking::{build_owner_summary, BookingRow, OwnerStatsRow, RecentBookingRow, StayRow},
    ConnectionPool,
};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

// Postgres のエラーコード。直列化失敗と排他制約違反は
// 同時予約の敗者側で起きるため、どちらも「空室なし」として返す
const SERIALIZATION_FAILURE: &str = "40001";
const EXCLUSION_VIOLATION: &str = "23P01";

// 直列化失敗は期間が重ならない予約同士の衝突でも起きうる。
// その場合は偽陰性になるが、クライアントが再試行すれば成功する
// （サーバ側では再試行しない）
fn is_conflict_code(code: &str) -> bool {
    code == SERIALIZATION_FAILURE || code == EXCLUSION_VIOLATION
}

fn is_booking_conflict(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| is_conflict_code(&code))
        .unwrap_or(false)
}

fn room_unavailable(room_id: RoomId) -> AppError {
    AppError::RoomUnavailable(format!(
        "客室（{room_id}）は指定の期間には予約できません"
    ))
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking> {
        let mut tx = self.db.begin().await?;

        // 空き確認と INSERT を単一の直列化可能トランザクションにまとめる
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の客室 ID をもつ客室が存在するか
        // - 宿泊人数が定員以下か
        // - 希望期間が既存の確定済み予約と重なっていないか
        let total_price = {
            //
            // ① 客室の存在確認 ＋ 定員と料金の取得
            //
            let room_row: Option<(i64, i32)> = sqlx::query_as(
                r#"
                SELECT price_per_night, capacity
                FROM rooms
                WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some((price_per_night, capacity)) = room_row else {
                return Err(AppError::EntityNotFound(format!(
                    "客室（{}）が見つかりませんでした",
                    event.room_id
                )));
            };

            if event.guest_count > capacity {
                return Err(AppError::InvalidGuestCount(format!(
                    "宿泊人数（{}）が客室の定員（{capacity}）を超えています",
                    event.guest_count
                )));
            }

            //
            // ② 希望期間が既存の確定済み予約と重なっていないか確認
            //    重複条件：
            //        existing.check_in < new.check_out AND new.check_in < existing.check_out
            //
            let overlap: Option<(BookingId,)> = sqlx::query_as(
                r#"
                SELECT booking_id
                FROM bookings
                WHERE room_id = $1
                  AND booking_status = 'confirmed'
                  AND check_in < $3
                  AND check_out > $2
                LIMIT 1
                "#,
            )
            .bind(event.room_id)
            .bind(event.stay.check_in())
            .bind(event.stay.check_out())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlap.is_some() {
                return Err(room_unavailable(event.room_id));
            }

            // 料金は予約時点の一泊料金で確定する
            event.stay.total_price(price_per_night)
        };

        // チェックを通過したので bookings テーブルにレコードを追加する
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, room_id, user_id, check_in, check_out,
                guest_count, total_price, payment_status, booking_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking_id)
        .bind(event.room_id)
        .bind(event.booked_by)
        .bind(event.stay.check_in())
        .bind(event.stay.check_out())
        .bind(event.guest_count)
        .bind(total_price)
        .bind(PaymentStatus::Pending.as_ref())
        .bind(BookingStatus::Confirmed.as_ref())
        .execute(&mut *tx)
        .await;

        match res {
            Ok(r) if r.rows_affected() < 1 => {
                return Err(AppError::NoRowsAffectedError(
                    "No booking record has been created".into(),
                ));
            }
            Ok(_) => {}
            // 同時に同じ期間を予約しようとした敗者側は
            // 排他制約違反になるため、空室なしとして返す
            Err(e) if is_booking_conflict(&e) => {
                return Err(room_unavailable(event.room_id));
            }
            Err(e) => return Err(AppError::SpecificOperationError(e)),
        }

        if let Err(e) = tx.commit().await {
            if is_booking_conflict(&e) {
                return Err(room_unavailable(event.room_id));
            }
            return Err(AppError::TransactionError(e));
        }

        Ok(CreatedBooking {
            booking_id,
            total_price,
        })
    }

    // 客室 ID に紐づく確定済み予約の宿泊期間を取得する
    async fn find_confirmed_stays_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<StayRange>> {
        let rows: Vec<StayRow> = sqlx::query_as(
            r#"
                SELECT check_in, check_out
                FROM bookings
                WHERE room_id = $1
                  AND booking_status = 'confirmed'
                ORDER BY check_in ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(StayRow::into_stay).collect()
    }

    // ユーザー ID に紐づく予約一覧を客室情報付きで取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                b.booking_id,
                b.user_id,
                b.room_id,
                b.check_in,
                b.check_out,
                b.guest_count,
                b.total_price,
                b.payment_status,
                b.booking_status,
                b.created_at,
                r.name AS room_name,
                r.hotel_name,
                r.city,
                r.image_url,
                r.price_per_night
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
                ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    // オーナーの全客室に対する予約を集計する。
    // 売上は決済状態に関わらず total_price を合算する（決済ゲートウェイ未接続のため）
    async fn owner_summary(&self, owner_id: UserId) -> AppResult<OwnerSummary> {
        let stats: OwnerStatsRow = sqlx::query_as(
            r#"
                SELECT
                COUNT(*) AS total_bookings,
                COALESCE(SUM(b.total_price), 0)::BIGINT AS total_revenue
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE r.owned_by = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 直近 5 件。作成日時の降順、同時刻の並びは保存順に依存する
        let recent_rows: Vec<RecentBookingRow> = sqlx::query_as(
            r#"
                SELECT
                b.booking_id,
                u.user_name AS guest_name,
                r.name AS room_name,
                b.check_in,
                b.check_out,
                b.total_price,
                b.payment_status,
                b.created_at
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE r.owned_by = $1
                ORDER BY b.created_at DESC
                LIMIT 5
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        build_owner_summary(stats, recent_rows)
    }
}

impl BookingRepositoryImpl {
    // create でのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 同時に同じ客室を予約して敗けた側の契約。
    // 直列化失敗（40001）と排他制約違反（23P01）だけを「空室なし」へ写し、
    // それ以外の DB エラーは内部エラーとして伝播する
    #[test]
    fn losing_writer_error_codes_map_to_room_unavailable() {
        assert!(is_conflict_code("40001"));
        assert!(is_conflict_code("23P01"));
        // 一意制約違反やデッドロックは対象外
        assert!(!is_conflict_code("23505"));
        assert!(!is_conflict_code("40P01"));
    }
}
