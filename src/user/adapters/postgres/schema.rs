//! Diesel schema for user persistence.

diesel::table! {
    /// Registered user accounts.
    users (username) {
        /// Unique username.
        #[max_length = 50]
        username -> Varchar,
        /// PHC-encoded password hash.
        password_hash -> Text,
        /// Granted role names.
        roles -> Array<Text>,
        /// Optional display name.
        #[max_length = 100]
        display_name -> Nullable<Varchar>,
        /// Optional email address.
        #[max_length = 254]
        email -> Nullable<Varchar>,
        /// Registration timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
