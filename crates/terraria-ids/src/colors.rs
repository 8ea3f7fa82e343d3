//! Default map colors.
//!
//! Colors for the most common terrain blocks and walls. Anything missing
//! is left to the renderer's fallback.

/// `(block id, [r, g, b])`
pub const TILE_COLORS: &[(u16, [u8; 3])] = &[
    (0, [151, 107, 75]),
    (1, [128, 128, 128]),
    (2, [28, 216, 94]),
    (5, [151, 107, 75]),
    (6, [140, 101, 80]),
    (7, [150, 67, 22]),
    (8, [185, 164, 23]),
    (9, [185, 194, 195]),
    (22, [98, 95, 167]),
    (23, [141, 137, 223]),
    (25, [75, 74, 130]),
    (30, [170, 120, 84]),
    (37, [104, 86, 84]),
    (38, [144, 144, 144]),
    (40, [146, 81, 68]),
    (41, [66, 84, 109]),
    (43, [84, 100, 63]),
    (44, [107, 68, 99]),
    (53, [186, 168, 84]),
    (56, [87, 81, 173]),
    (57, [68, 68, 76]),
    (58, [142, 66, 66]),
    (59, [92, 68, 73]),
    (60, [143, 215, 29]),
    (63, [110, 140, 182]),
    (64, [196, 96, 114]),
    (65, [56, 150, 97]),
    (66, [160, 118, 58]),
    (67, [140, 58, 166]),
    (68, [125, 191, 197]),
    (70, [93, 127, 255]),
    (107, [11, 80, 143]),
    (108, [91, 169, 169]),
    (109, [78, 193, 227]),
    (111, [228, 92, 149]),
    (112, [103, 98, 122]),
    (116, [238, 225, 218]),
    (117, [181, 172, 190]),
    (123, [106, 107, 118]),
    (147, [211, 236, 241]),
    (161, [144, 195, 232]),
    (166, [129, 125, 93]),
    (167, [62, 82, 114]),
    (168, [132, 157, 127]),
    (169, [152, 171, 198]),
    (189, [223, 255, 255]),
    (191, [151, 107, 75]),
    (192, [26, 196, 84]),
    (199, [208, 80, 80]),
    (203, [128, 44, 45]),
    (204, [125, 55, 65]),
    (211, [163, 211, 42]),
    (221, [254, 121, 2]),
    (222, [237, 154, 191]),
    (223, [194, 202, 193]),
    (224, [113, 113, 130]),
    (225, [227, 125, 22]),
    (226, [141, 56, 0]),
    (234, [53, 44, 41]),
];

/// `(wall id, [r, g, b])`
pub const WALL_COLORS: &[(u8, [u8; 3])] = &[
    (1, [52, 52, 52]),
    (2, [88, 61, 46]),
    (3, [61, 58, 78]),
    (4, [73, 51, 36]),
    (5, [52, 52, 52]),
    (7, [27, 31, 42]),
    (8, [31, 39, 26]),
    (9, [41, 28, 36]),
    (15, [61, 46, 30]),
    (16, [88, 61, 46]),
    (27, [73, 51, 36]),
    (40, [86, 106, 130]),
    (54, [42, 48, 53]),
    (63, [30, 80, 48]),
    (64, [53, 80, 30]),
    (71, [95, 118, 137]),
    (83, [74, 31, 31]),
    (86, [100, 70, 10]),
    (87, [73, 57, 25]),
];

/// Default color of block `id`.
pub fn tile_color(id: u16) -> Option<[u8; 3]> {
    TILE_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, color)| *color)
}

/// Default color of wall `id`.
pub fn wall_color(id: u8) -> Option<[u8; 3]> {
    WALL_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, color)| *color)
}
