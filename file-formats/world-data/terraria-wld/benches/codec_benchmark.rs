//! Benchmarks for the tile codec and full world decode

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use terraria_wld::{
    BinaryStream, Block, FramedTiles, Liquid, LiquidKind, Tile, TileCodec, Wall, World, WorldFile,
};

/// A small-world sized grid with layered terrain and some noise
fn create_test_world() -> World {
    let (width, height) = (1050, 300);
    let mut world = World::new(width, height, FramedTiles::from_ids(314, [21])).unwrap();

    for x in 0..width {
        let surface = 90 + (x * 7 % 13);
        for y in surface..height {
            let tile = if (x * 31 + y * 17) % 11 == 0 {
                Tile::default().with_block(Block::new(7)).with_wall(Wall::new(2))
            } else if y > 200 && (x + y) % 5 == 0 {
                Tile::default().with_liquid(Liquid::new(LiquidKind::Lava, 255))
            } else {
                Tile::default().with_block(Block::new(1)).with_wall(Wall::new(2))
            };
            world.set_tile(x, y, tile).unwrap();
        }
    }
    world
}

fn bench_tile_codec(c: &mut Criterion) {
    let world = create_test_world();
    let codec = TileCodec::new(world.width(), world.height(), world.framed());
    let mut encoded = BinaryStream::new();
    codec.encode(&mut encoded, world.tile_grid()).unwrap();

    c.bench_function("encode_tiles", |b| {
        b.iter(|| {
            let mut stream = BinaryStream::new();
            codec.encode(&mut stream, black_box(world.tile_grid())).unwrap();
            stream
        })
    });

    c.bench_function("decode_tiles", |b| {
        b.iter(|| {
            let mut stream = BinaryStream::from_bytes(black_box(encoded.as_bytes()));
            codec.decode(&mut stream).unwrap()
        })
    });
}

fn bench_world(c: &mut Criterion) {
    let world = create_test_world();
    let bytes = WorldFile::new().encode(&world).unwrap();

    c.bench_function("decode_world", |b| {
        b.iter(|| WorldFile::new().decode(black_box(bytes.as_slice())).unwrap())
    });

    c.bench_function("read_summary", |b| {
        b.iter(|| WorldFile::new().read_summary(black_box(bytes.as_slice())).unwrap())
    });
}

criterion_group!(benches, bench_tile_codec, bench_world);
criterion_main!(benches);
