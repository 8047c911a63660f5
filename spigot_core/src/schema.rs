diesel::table! {
    twitter_account (id) {
        id -> Integer,
        user_id -> BigInt,
        auth_token -> Text,
        csrf_token -> Text,
        bearer_token -> Text,
    }
}
