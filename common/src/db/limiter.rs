use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, Paginator, PaginatorTrait, QuerySelect,
    Select, SelectModel, Selector,
};
use std::num::NonZeroU64;

/// A window over a query, together with the means of counting the whole query.
///
/// Counting and fetching are two independent statements, run in the order the caller invokes
/// them. They don't share a transaction.
pub struct Limiter<'db, C, M>
where
    C: ConnectionTrait,
    M: FromQueryResult + Send + Sync + 'db,
{
    db: &'db C,
    window: Selector<SelectModel<M>>,
    all: Paginator<'db, C, SelectModel<M>>,
}

impl<'db, C, M> Limiter<'db, C, M>
where
    C: ConnectionTrait,
    M: FromQueryResult + Send + Sync + 'db,
{
    /// Rows inside the window.
    pub async fn fetch(self) -> Result<Vec<M>, DbErr> {
        self.window.all(self.db).await
    }

    /// Rows of the query, ignoring the window.
    pub async fn total(&self) -> Result<u64, DbErr> {
        self.all.num_items().await
    }
}

pub trait LimiterAsModelTrait<'db, C>
where
    C: ConnectionTrait,
{
    /// Window the query to `limit` rows after skipping `offset`, projecting rows into `M`.
    ///
    /// A zero `offset` or `limit` means "not limited".
    fn limiting_as<M: FromQueryResult + Send + Sync + 'db>(
        self,
        db: &'db C,
        offset: u64,
        limit: u64,
    ) -> Limiter<'db, C, M>;
}

impl<'db, C, E> LimiterAsModelTrait<'db, C> for Select<E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    fn limiting_as<M: FromQueryResult + Send + Sync + 'db>(
        self,
        db: &'db C,
        offset: u64,
        limit: u64,
    ) -> Limiter<'db, C, M> {
        let window = self
            .clone()
            .offset(NonZeroU64::new(offset).map(NonZeroU64::get))
            .limit(NonZeroU64::new(limit).map(NonZeroU64::get))
            .into_model::<M>();

        Limiter {
            db,
            window,
            all: self.into_model::<M>().paginate(db, 1),
        }
    }
}
