/*
 * Responsibility
 * - エンドポイントが要求する permission を型として宣言する
 * - `Authorized<PostActors>` のように handler の引数で要求を表現する
 *
 * 置かないもの
 * - 判定ロジック (services::auth::permissions)
 */

/// A permission string a handler requires, carried at the type level.
pub trait Permission {
    const NAME: &'static str;
}

macro_rules! permission {
    ($tag:ident, $name:literal) => {
        pub enum $tag {}

        impl Permission for $tag {
            const NAME: &'static str = $name;
        }
    };
}

// actors
permission!(GetActors, "get:actors");
permission!(PostActors, "post:actors");
permission!(PatchActors, "patch:actors");
permission!(DeleteActors, "delete:actors");

// movies
permission!(GetMovies, "get:movies");
permission!(PostMovies, "post:movies");
permission!(PatchMovies, "patch:movies");
permission!(DeleteMovies, "delete:movies");
