/**
 * Responsibility
 *
 * 主な責務
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - ActorTag, MovieTag などのタグ型
 *  - type ActorId = EntityId<ActorTag> のような alias
 *
 * 置かないもの
 *  - parse ロジック / extractor 実装
 */
use super::core::{Entity, EntityId};

// actors
pub enum ActorTag {}
impl Entity for ActorTag {
    const PARAM: &'static str = "actor_id";
    const NAME: &'static str = "actor";
}
pub type ActorId = EntityId<ActorTag>;

// movies
pub enum MovieTag {}
impl Entity for MovieTag {
    const PARAM: &'static str = "movie_id";
    const NAME: &'static str = "movie";
}
pub type MovieId = EntityId<MovieTag>;
