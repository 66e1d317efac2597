//! Diesel schema definitions for the SQLite store.

diesel::table! {
    users (id) {
        id -> Text,
        username -> Text,
        password_hash -> Text,
    }
}

diesel::table! {
    news (id) {
        id -> BigInt,
        title -> Text,
        body -> Text,
        date -> Date,
    }
}

diesel::table! {
    comments (id) {
        id -> BigInt,
        news_id -> BigInt,
        author_id -> Text,
        text -> Text,
        created -> Timestamp,
    }
}

diesel::table! {
    notes (id) {
        id -> BigInt,
        title -> Text,
        body -> Text,
        slug -> Text,
        author_id -> Text,
    }
}

diesel::joinable!(comments -> news (news_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(notes -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, news, comments, notes);
