use strum::{AsRefStr, EnumString};

// ロールはサインアップ時に確定し、昇格の経路は存在しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
pub enum Role {
    #[default]
    #[strum(serialize = "user")]
    User,
    #[strum(serialize = "hotel_owner")]
    HotelOwner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_db_strings() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("hotel_owner".parse::<Role>().unwrap(), Role::HotelOwner);
        assert_eq!(Role::HotelOwner.as_ref(), "hotel_owner");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("admin".parse::<Role>().is_err());
    }
}
