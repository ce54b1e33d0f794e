use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    DishService, OrderService, Payload, dish_pipeline, order_create_pipeline,
    order_update_pipeline,
};
use entity_store::InMemoryStore;
use serde_json::json;

fn order_payload(lines: usize) -> Payload {
    let dishes: Vec<_> = (0..lines)
        .map(|i| json!({ "id": format!("dish-{i}"), "quantity": i + 1 }))
        .collect();
    Payload::from_data(json!({
        "deliverTo": "308 Negra Arroyo Lane, Albuquerque, NM",
        "mobileNumber": "(505) 143-3369",
        "status": "pending",
        "dishes": dishes
    }))
}

fn dish_payload() -> Payload {
    Payload::from_data(json!({
        "name": "Dolcelatte and chickpea spaghetti",
        "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
        "image_url": "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
        "price": 19
    }))
}

fn bench_dish_pipeline(c: &mut Criterion) {
    let pipeline = dish_pipeline();
    let payload = dish_payload();

    c.bench_function("pipeline/dish", |b| {
        b.iter(|| pipeline.run(&payload).unwrap());
    });
}

fn bench_order_pipelines(c: &mut Criterion) {
    let create = order_create_pipeline();
    let update = order_update_pipeline();
    let small = order_payload(3);
    let large = order_payload(100);

    c.bench_function("pipeline/order_create_3_lines", |b| {
        b.iter(|| create.run(&small).unwrap());
    });

    c.bench_function("pipeline/order_update_100_lines", |b| {
        b.iter(|| update.run(&large).unwrap());
    });
}

fn bench_rejection(c: &mut Criterion) {
    let pipeline = order_create_pipeline();
    let payload = Payload::default();

    c.bench_function("pipeline/order_first_check_rejects", |b| {
        b.iter(|| pipeline.run(&payload).unwrap_err());
    });
}

fn bench_create_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("service/create_dish_and_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let dishes = DishService::new(InMemoryStore::new());
                let orders = OrderService::new(InMemoryStore::new());
                dishes.create(&dish_payload()).await.unwrap();
                orders.create(&order_payload(3)).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_dish_pipeline,
    bench_order_pipelines,
    bench_rejection,
    bench_create_cycle
);
criterion_main!(benches);
