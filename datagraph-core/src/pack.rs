//! Front-chain circle packing over the dataset hierarchy
//!
//! Invariants:
//! - Sibling input order is preserved; the layout never sorts
//! - Sibling circles do not overlap and fit the square canvas
//! - Identical input yields an identical layout

use crate::dataset::{Dataset, Node};

/// Packing weight of a leaf. A `pval` of exactly 1 is pinned to a small
/// constant so fully insignificant points stay visible; everything else
/// grows as `-ln(pval)`, unbounded toward high significance.
pub fn leaf_weight(pval: f64) -> f64 {
    if pval == 1.0 {
        0.5
    } else {
        -pval.ln()
    }
}

/// A node with its computed circle, in canvas coordinates after packing
#[derive(Debug, Clone)]
pub struct PackedNode {
    pub acc: String,
    pub ratio: Option<f64>,
    pub pval: Option<f64>,
    /// Area weight: `leaf_weight(pval)` for leaves, sum of children otherwise
    pub weight: f64,
    pub depth: usize,
    pub leaf: bool,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// The packed tree. Index 0 is the dataset root (never drawn).
#[derive(Debug)]
pub struct Layout {
    nodes: Vec<PackedNode>,
    children_of: Vec<Vec<usize>>,
}

impl Layout {
    pub fn nodes(&self) -> &[PackedNode] {
        &self.nodes
    }

    /// Leaves in input order, the set of drawn circles
    pub fn leaves(&self) -> impl Iterator<Item = &PackedNode> {
        self.nodes.iter().filter(|n| n.leaf)
    }

    /// Direct children of the root, the extent population for color and
    /// opacity (a quirk of the source system, preserved deliberately)
    pub fn root_children(&self) -> impl Iterator<Item = &PackedNode> {
        self.children_of[0].iter().map(move |&i| &self.nodes[i])
    }

    fn build(dataset: &Dataset) -> Layout {
        let mut layout = Layout {
            nodes: Vec::new(),
            children_of: Vec::new(),
        };
        layout.nodes.push(PackedNode {
            acc: String::new(),
            ratio: None,
            pval: None,
            weight: 0.0,
            depth: 0,
            leaf: false,
            x: 0.0,
            y: 0.0,
            r: 0.0,
        });
        layout.children_of.push(Vec::new());
        for child in &dataset.children {
            let idx = layout.push_subtree(child, 1);
            layout.children_of[0].push(idx);
        }
        let root_weight: f64 = layout.children_of[0]
            .iter()
            .map(|&i| layout.nodes[i].weight)
            .sum();
        layout.nodes[0].weight = root_weight;
        layout
    }

    fn push_subtree(&mut self, node: &Node, depth: usize) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(PackedNode {
            acc: node.acc.clone(),
            ratio: node.ratio,
            pval: node.pval,
            weight: 0.0,
            depth,
            leaf: node.is_leaf(),
            x: 0.0,
            y: 0.0,
            r: 0.0,
        });
        self.children_of.push(Vec::new());
        if node.is_leaf() {
            self.nodes[idx].weight = leaf_weight(node.pval.unwrap_or(1.0));
        } else {
            let mut weight = 0.0;
            for child in &node.children {
                let child_idx = self.push_subtree(child, depth + 1);
                self.children_of[idx].push(child_idx);
                weight += self.nodes[child_idx].weight;
            }
            self.nodes[idx].weight = weight;
        }
        idx
    }

    /// One bottom-up packing pass: pack every sibling group, assigning
    /// child positions relative to the parent center and overwriting each
    /// internal node's radius with its enclosure radius.
    fn pack_pass(&mut self) {
        self.pack_subtree(0);
    }

    fn pack_subtree(&mut self, idx: usize) {
        let kids = self.children_of[idx].clone();
        if kids.is_empty() {
            return;
        }
        for &child in &kids {
            self.pack_subtree(child);
        }
        let mut circles: Vec<Circle> = kids
            .iter()
            .map(|&i| Circle {
                x: 0.0,
                y: 0.0,
                r: self.nodes[i].r,
            })
            .collect();
        let enclosure = pack_siblings(&mut circles);
        for (&i, circle) in kids.iter().zip(&circles) {
            self.nodes[i].x = circle.x;
            self.nodes[i].y = circle.y;
        }
        self.nodes[idx].r = enclosure;
    }

    fn transform(&mut self, idx: usize, x: f64, y: f64, k: f64) {
        let nx = x + k * self.nodes[idx].x;
        let ny = y + k * self.nodes[idx].y;
        self.nodes[idx].x = nx;
        self.nodes[idx].y = ny;
        self.nodes[idx].r *= k;
        let kids = self.children_of[idx].clone();
        for child in kids {
            self.transform(child, nx, ny, k);
        }
    }
}

/// Pack a dataset into a `diameter x diameter` canvas with the given
/// inter-circle padding (canvas units).
pub fn pack_dataset(dataset: &Dataset, diameter: f64, padding: f64) -> Layout {
    let mut layout = Layout::build(dataset);

    for node in &mut layout.nodes {
        node.r = node.weight.sqrt();
    }
    layout.pack_pass();

    // Padding pass: inflate radii by the padding converted into layout
    // units, re-pack, deflate. The enclosures keep the inflated spacing.
    if padding > 0.0 && layout.nodes[0].r > 0.0 {
        let dr = padding * (2.0 * layout.nodes[0].r / diameter) / 2.0;
        for node in &mut layout.nodes {
            node.r += dr;
        }
        layout.pack_pass();
        for node in &mut layout.nodes {
            node.r -= dr;
        }
    }

    let root_r = layout.nodes[0].r;
    let k = if root_r > 0.0 {
        diameter / (2.0 * root_r)
    } else {
        1.0
    };
    layout.transform(0, diameter / 2.0, diameter / 2.0, k);
    layout
}

#[derive(Debug, Clone, Copy)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

struct Bounds {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Bounds {
    fn new() -> Bounds {
        Bounds {
            x0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y0: f64::INFINITY,
            y1: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, c: &Circle) {
        self.x0 = self.x0.min(c.x - c.r);
        self.x1 = self.x1.max(c.x + c.r);
        self.y0 = self.y0.min(c.y - c.r);
        self.y1 = self.y1.max(c.y + c.r);
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dr = a.r + b.r;
    // slack tolerates tangency within float error
    0.999 * dr * dr > dx * dx + dy * dy
}

/// Place circle `c` tangent to `a` and `b`, on the outside of the front
fn place(circles: &mut [Circle], a: usize, b: usize, c: usize) {
    let db = circles[a].r + circles[c].r;
    let dx = circles[b].x - circles[a].x;
    let dy = circles[b].y - circles[a].y;
    if db > 0.0 && (dx != 0.0 || dy != 0.0) {
        let da = circles[b].r + circles[c].r;
        let dc = dx * dx + dy * dy;
        let da2 = da * da;
        let db2 = db * db;
        let x = 0.5 + (db2 - da2) / (2.0 * dc);
        let y = (2.0 * da2 * (db2 + dc) - (db2 - da2) * (db2 - da2) - db2 * db2 + dc * dc)
            .max(0.0)
            .sqrt()
            / (2.0 * dc);
        circles[c].x = circles[a].x + x * dx + y * dy;
        circles[c].y = circles[a].y + x * dy - y * dx;
    } else {
        circles[c].x = circles[a].x + db;
        circles[c].y = circles[a].y;
    }
}

/// Pack one sibling group around the origin with a front chain, re-center
/// on the bounding-box midpoint, and return the enclosing radius.
///
/// Positions are written in place; incoming positions are ignored.
fn pack_siblings(circles: &mut [Circle]) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    let mut bounds = Bounds::new();

    // front chain links, initially self-referential
    let mut next: Vec<usize> = (0..n).collect();
    let mut prev: Vec<usize> = (0..n).collect();

    let insert = |next: &mut [usize], prev: &mut [usize], a: usize, b: usize| {
        let c = next[a];
        next[a] = b;
        prev[b] = a;
        next[b] = c;
        prev[c] = b;
    };
    let splice = |next: &mut [usize], prev: &mut [usize], a: usize, b: usize| {
        next[a] = b;
        prev[b] = a;
    };

    circles[0].x = -circles[0].r;
    circles[0].y = 0.0;
    bounds.add(&circles[0]);

    if n > 1 {
        circles[1].x = circles[1].r;
        circles[1].y = 0.0;
        bounds.add(&circles[1]);

        if n > 2 {
            place(circles, 0, 1, 2);
            bounds.add(&circles[2]);
            insert(&mut next, &mut prev, 0, 2);
            insert(&mut next, &mut prev, 2, 1);

            let mut a = 0usize;
            let mut b = next[a];

            let mut i = 3;
            while i < n {
                place(circles, a, b, i);

                // scan the front both ways for the closest intersection
                let mut isect = false;
                let mut s1: usize = 1;
                let mut s2: usize = 1;
                let mut j = next[b];
                while j != b {
                    if intersects(&circles[j], &circles[i]) {
                        isect = true;
                        break;
                    }
                    j = next[j];
                    s1 += 1;
                }
                let mut k = prev[a];
                if isect {
                    while k != prev[j] {
                        if intersects(&circles[k], &circles[i]) {
                            break;
                        }
                        k = prev[k];
                        s2 += 1;
                    }
                }

                if isect {
                    // cut the front on the cheaper side and retry
                    if s1 < s2 || (s1 == s2 && circles[b].r < circles[a].r) {
                        b = j;
                    } else {
                        a = k;
                    }
                    splice(&mut next, &mut prev, a, b);
                } else {
                    insert(&mut next, &mut prev, a, i);
                    b = i;
                    bounds.add(&circles[i]);
                    i += 1;
                }
            }
        }
    }

    // re-center on the bounding box and compute the enclosing radius
    let cx = (bounds.x0 + bounds.x1) / 2.0;
    let cy = (bounds.y0 + bounds.y1) / 2.0;
    let mut enclosure: f64 = 0.0;
    for c in circles.iter_mut() {
        c.x -= cx;
        c.y -= cy;
        enclosure = enclosure.max(c.r + (c.x * c.x + c.y * c.y).sqrt());
    }
    enclosure
}
