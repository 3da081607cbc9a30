#[cfg(test)]
mod tests {
    use scribe::{
        Entity, Error, GenericSqlWriter, QueryCache, QueryCacheKey, QueryCacheType, SqlGenerator,
        SqlWriter,
    };
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    #[derive(Entity, Clone)]
    struct Ticket {
        id: i64,
        title: String,
    }

    #[derive(Entity, Clone)]
    struct Ticket2 {
        id: i64,
        title: String,
    }

    fn key(kind: QueryCacheType) -> QueryCacheKey {
        QueryCacheKey::new(kind, GenericSqlWriter::new().dialect_id(), Ticket::entity_type())
    }

    #[test]
    fn first_value_wins() {
        let cache = QueryCache::new();
        let first = cache
            .get_or_compute(&key(QueryCacheType::Get), || Ok("select 1".into()))
            .expect("Compute should succeed");
        let second = cache
            .get_or_compute(&key(QueryCacheType::Get), || Ok("select 2".into()))
            .expect("Compute should succeed");
        assert_eq!(&*second, "select 1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn errors_are_not_stored() {
        let cache = QueryCache::new();
        let result = cache.get_or_compute(&key(QueryCacheType::Count), || {
            Err(Error::msg("cannot build"))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
        let value = cache
            .get_or_compute(&key(QueryCacheType::Count), || Ok("select count(*)".into()))
            .expect("Compute should succeed");
        assert_eq!(&*value, "select count(*)");
    }

    #[test]
    fn keys() {
        let cache = QueryCache::new();
        let writer = GenericSqlWriter::new();
        let plain = key(QueryCacheType::GetAll);
        let included = key(QueryCacheType::GetAll).with_includes(&[Ticket2::entity_type()]);
        let other = QueryCacheKey::new(
            QueryCacheType::GetAll,
            writer.dialect_id(),
            Ticket2::entity_type(),
        );
        for (i, key) in [&plain, &included, &other, &key(QueryCacheType::Any)]
            .into_iter()
            .enumerate()
        {
            cache
                .get_or_compute(key, || Ok(format!("statement {i}")))
                .expect("Compute should succeed");
        }
        assert_eq!(cache.len(), 4);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_callers_agree() {
        let cache = QueryCache::new();
        let computed = AtomicUsize::new(0);
        let results: Vec<Arc<str>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    let computed = &computed;
                    s.spawn(move || {
                        cache
                            .get_or_compute(&key(QueryCacheType::Project), || {
                                computed.fetch_add(1, Ordering::Relaxed);
                                Ok(format!("select {i}"))
                            })
                            .expect("Compute should succeed")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("Thread should not panic"))
                .collect()
        });
        assert!(computed.load(Ordering::Relaxed) >= 1);
        assert!(results.iter().all(|v| Arc::ptr_eq(v, &results[0])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn generator_clear() {
        let generator = SqlGenerator::default();
        let writer = GenericSqlWriter::new();
        let before = generator
            .get::<Ticket>(&writer, 1_i64)
            .expect("Could not generate the get statement");
        assert_eq!(generator.cache().len(), 1);
        generator.clear();
        assert!(generator.cache().is_empty());
        let after = generator
            .get::<Ticket>(&writer, 1_i64)
            .expect("Could not generate the get statement");
        assert_eq!(before, after);
        assert!(!Arc::ptr_eq(&before.sql, &after.sql));
    }

    #[test]
    fn global_generator() {
        let writer = GenericSqlWriter::new();
        let statement = SqlGenerator::global()
            .count::<Ticket2>(&writer)
            .expect("Could not generate the count statement");
        assert_eq!(&*statement.sql, "select count(*) from \"Ticket2s\"");
        assert!(std::ptr::eq(SqlGenerator::global(), SqlGenerator::global()));
    }
}
