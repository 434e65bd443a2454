//! Reference gate library for end-to-end tests.
//!
//! Builds small, hand-flattened designs the way the flattening stage would
//! hand them over: every instance wired with its actual wire, net and bit
//! range, nets recording their drivers, and the circuit driving its own
//! inputs.
//!
//! | Gate | Kind | Built from |
//! |---|---|---|
//! | `Nand` | primitive | |
//! | `Xor` | primitive | |
//! | `Buf2` | primitive, 2-bit | |
//! | `Reg8` | primitive, 8-bit | |
//! | `Not` | compound | one `Nand` fed twice by `In` |
//! | `And` | compound | `Nand` then `Not` |
//! | `Or` | compound | two `Not`s into a `Nand` |
//! | `HalfAdder` | compound | `Xor` and `And` |
//! | `And2` | compound, 2-bit | one `And` per bit slice |
//! | `Split4` | compound, 4-bit | two `Buf2`s on the halves of `in` |
//! | `Join4` | compound, 4-bit | two `Buf2`s driving the halves of `out` |
//! | `Preset` | compound, 8-bit | a `Reg8` fed the constant 5 |
//! | `Hold` | compound, 8-bit | a `Reg8` on `d` |
//! | `Seeded` | compound, 8-bit | a `Hold` fed the constant 5 |

#![warn(missing_docs)]

use gatesketch_common::{BitRange, Wire};
use gatesketch_config::SketchConfig;
use gatesketch_ir::{Design, DesignBuilder, GateTypeId, NetId, NodeId, Pin};

/// Evaluation text of the `Nand` primitive.
pub const NAND_JS: &str = "function(w) { return (w.a && w.b) ? 0 : 1; }";

/// Evaluation text of the `Xor` primitive.
pub const XOR_JS: &str = "function(w) { return w.a ^ w.b; }";

/// A wire in some scope together with the net bits it carries.
#[derive(Debug, Clone)]
pub struct Signal {
    /// The wire as seen in the enclosing scope.
    pub wire: Wire,
    /// The flattened net.
    pub net: NetId,
    /// The bits of the net the wire carries.
    pub range: BitRange,
}

impl Signal {
    /// A signal carrying all of `net`.
    pub fn whole(name: &str, width: u32, net: NetId) -> Self {
        Self {
            wire: Wire::new(name, width),
            net,
            range: BitRange::full(width),
        }
    }

    /// The same bits seen through a pin named `pin` of a nested part.
    pub fn rename(&self, pin: &str) -> Self {
        Self {
            wire: Wire::new(pin, self.range.len()),
            net: self.net,
            range: self.range,
        }
    }

    /// Bits `start..stop` of this signal.
    pub fn slice(&self, start: u32, stop: u32) -> Self {
        Self {
            wire: self.wire.clone().slice(start, stop),
            net: self.net,
            range: BitRange::new(self.range.start + start, self.range.start + stop),
        }
    }
}

/// Every gate type of the reference library.
#[derive(Debug, Clone, Copy)]
pub struct Library {
    /// `Nand`.
    pub nand: GateTypeId,
    /// `Xor`.
    pub xor: GateTypeId,
    /// `Buf2`.
    pub buf2: GateTypeId,
    /// `Reg8`.
    pub reg8: GateTypeId,
    /// `Not`.
    pub not: GateTypeId,
    /// `And`.
    pub and: GateTypeId,
    /// `Or`.
    pub or: GateTypeId,
    /// `HalfAdder`.
    pub half_adder: GateTypeId,
    /// `And2`.
    pub and2: GateTypeId,
    /// `Split4`.
    pub split4: GateTypeId,
    /// `Join4`.
    pub join4: GateTypeId,
    /// `Preset`.
    pub preset: GateTypeId,
    /// `Hold`.
    pub hold: GateTypeId,
    /// `Seeded`.
    pub seeded: GateTypeId,
}

fn pins(names: &[(&str, u32)]) -> Vec<Pin> {
    names.iter().map(|&(name, width)| Pin::new(name, width)).collect()
}

impl Library {
    /// Registers the library with `b`.
    pub fn new(b: &mut DesignBuilder) -> Self {
        let nand = b.primitive(
            "Nand",
            pins(&[("a", 1), ("b", 1)]),
            pins(&[("out", 1)]),
            [("out", NAND_JS)],
        );
        let xor = b.primitive(
            "Xor",
            pins(&[("a", 1), ("b", 1)]),
            pins(&[("out", 1)]),
            [("out", XOR_JS)],
        );
        let buf2 = b.primitive(
            "Buf2",
            pins(&[("in", 2)]),
            pins(&[("out", 2)]),
            [("out", "function(w) { return w.in; }")],
        );
        let reg8 = b.primitive(
            "Reg8",
            pins(&[("d", 8)]),
            pins(&[("q", 8)]),
            [("q", "function(w) { return w.d; }")],
        );
        let not = b.compound("Not", pins(&[("In", 1)]), pins(&[("out", 1)]), vec![nand]);
        let and = b.compound(
            "And",
            pins(&[("a", 1), ("b", 1)]),
            pins(&[("out", 1)]),
            vec![nand, not],
        );
        let or = b.compound(
            "Or",
            pins(&[("a", 1), ("b", 1)]),
            pins(&[("out", 1)]),
            vec![not, not, nand],
        );
        let half_adder = b.compound(
            "HalfAdder",
            pins(&[("a", 1), ("b", 1)]),
            pins(&[("s", 1), ("c", 1)]),
            vec![xor, and],
        );
        let and2 = b.compound(
            "And2",
            pins(&[("a", 2), ("b", 2)]),
            pins(&[("out", 2)]),
            vec![and, and],
        );
        let split4 = b.compound(
            "Split4",
            pins(&[("in", 4)]),
            pins(&[("lo", 2), ("hi", 2)]),
            vec![buf2, buf2],
        );
        let join4 = b.compound(
            "Join4",
            pins(&[("lo", 2), ("hi", 2)]),
            pins(&[("out", 4)]),
            vec![buf2, buf2],
        );
        let preset = b.compound("Preset", Vec::new(), pins(&[("q", 8)]), vec![reg8]);
        let hold = b.compound("Hold", pins(&[("d", 8)]), pins(&[("q", 8)]), vec![reg8]);
        let seeded = b.compound("Seeded", Vec::new(), pins(&[("q", 8)]), vec![hold]);
        Self {
            nand,
            xor,
            buf2,
            reg8,
            not,
            and,
            or,
            half_adder,
            and2,
            split4,
            join4,
            preset,
            hold,
            seeded,
        }
    }

    fn place(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        gate: GateTypeId,
        bindings: &[(&str, &Signal)],
    ) -> NodeId {
        b.instance(
            parent,
            gate,
            bindings
                .iter()
                .map(|&(pin, s)| (pin, s.wire.clone(), s.net, s.range)),
        )
    }

    fn primitive(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        gate: GateTypeId,
        inputs: &[(&str, &Signal)],
        output: (&str, &Signal),
    ) -> NodeId {
        let mut bindings = inputs.to_vec();
        bindings.push(output);
        let node = self.place(b, parent, gate, &bindings);
        b.drive(output.1.net, node, output.0, output.1.range);
        node
    }

    /// Places a `Nand` under `parent`.
    pub fn place_nand(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        a: &Signal,
        bb: &Signal,
        out: &Signal,
    ) -> NodeId {
        self.primitive(b, parent, self.nand, &[("a", a), ("b", bb)], ("out", out))
    }

    /// Places an `Xor` under `parent`.
    pub fn place_xor(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        a: &Signal,
        bb: &Signal,
        out: &Signal,
    ) -> NodeId {
        self.primitive(b, parent, self.xor, &[("a", a), ("b", bb)], ("out", out))
    }

    /// Places a `Buf2` under `parent`.
    pub fn place_buf2(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        input: &Signal,
        out: &Signal,
    ) -> NodeId {
        self.primitive(b, parent, self.buf2, &[("in", input)], ("out", out))
    }

    /// Places a `Not` and its `Nand` under `parent`.
    pub fn place_not(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        input: &Signal,
        out: &Signal,
    ) -> NodeId {
        let node = self.place(b, parent, self.not, &[("In", input), ("out", out)]);
        let inner = input.rename("In");
        self.place_nand(b, node, &inner, &inner, &out.rename("out"));
        node
    }

    /// Places an `And` and its parts under `parent`.
    pub fn place_and(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        a: &Signal,
        bb: &Signal,
        out: &Signal,
    ) -> NodeId {
        let node = self.place(b, parent, self.and, &[("a", a), ("b", bb), ("out", out)]);
        let c = Signal::whole("c", 1, b.net("c", 1));
        self.place_nand(b, node, &a.rename("a"), &bb.rename("b"), &c);
        self.place_not(b, node, &c, &out.rename("out"));
        node
    }

    /// Places an `Or` and its parts under `parent`.
    pub fn place_or(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        a: &Signal,
        bb: &Signal,
        out: &Signal,
    ) -> NodeId {
        let node = self.place(b, parent, self.or, &[("a", a), ("b", bb), ("out", out)]);
        let na = Signal::whole("na", 1, b.net("na", 1));
        let nb = Signal::whole("nb", 1, b.net("nb", 1));
        self.place_not(b, node, &a.rename("a"), &na);
        self.place_not(b, node, &bb.rename("b"), &nb);
        self.place_nand(b, node, &na, &nb, &out.rename("out"));
        node
    }

    /// Places a `Hold` and its `Reg8` under `parent`.
    pub fn place_hold(
        &self,
        b: &mut DesignBuilder,
        parent: NodeId,
        d: &Signal,
        q: &Signal,
    ) -> NodeId {
        let node = self.place(b, parent, self.hold, &[("d", d), ("q", q)]);
        self.primitive(b, node, self.reg8, &[("d", &d.rename("d"))], ("q", &q.rename("q")));
        node
    }
}

/// A design under construction: the builder, the library and the circuit.
pub struct Fixture {
    /// The builder holding the library.
    pub builder: DesignBuilder,
    /// The reference library.
    pub lib: Library,
}

impl Fixture {
    /// Starts a design with the reference library registered.
    pub fn new() -> Self {
        let mut builder = DesignBuilder::new();
        let lib = Library::new(&mut builder);
        Self { builder, lib }
    }

    /// Instantiates `gate` as the circuit with one net per pin, named after
    /// the pin. Returns the root and its pin signals, inputs first.
    pub fn root(
        &mut self,
        gate: GateTypeId,
        inputs: &[(&str, u32)],
        outputs: &[(&str, u32)],
    ) -> (NodeId, Vec<Signal>) {
        let signals: Vec<Signal> = inputs
            .iter()
            .chain(outputs)
            .map(|&(name, width)| Signal::whole(name, width, self.builder.net(name, width)))
            .collect();
        let root = self.builder.root(
            gate,
            inputs
                .iter()
                .chain(outputs)
                .zip(&signals)
                .map(|(&(name, _), s)| (name, s.net, s.range)),
        );
        for (&(name, _), s) in inputs.iter().zip(&signals) {
            self.builder.drive(s.net, root, name, s.range);
        }
        (root, signals)
    }

    /// Finishes the design.
    pub fn finish(self, root: NodeId) -> Design {
        self.builder.finish(root)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A lone `Nand` as the circuit.
pub fn nand_design() -> Design {
    let mut f = Fixture::new();
    let (root, _) = f.root(f.lib.nand, &[("a", 1), ("b", 1)], &[("out", 1)]);
    f.finish(root)
}

/// `And` = `Nand` followed by `Not`, with `Not` built from one `Nand`.
pub fn and_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.and, &[("a", 1), ("b", 1)], &[("out", 1)]);
    let b = &mut f.builder;
    let c = Signal::whole("c", 1, b.net("c", 1));
    lib.place_nand(b, root, &s[0], &s[1], &c);
    lib.place_not(b, root, &c, &s[2]);
    f.finish(root)
}

/// `Or` from two `Not`s into a `Nand`.
pub fn or_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.or, &[("a", 1), ("b", 1)], &[("out", 1)]);
    let b = &mut f.builder;
    let na = Signal::whole("na", 1, b.net("na", 1));
    let nb = Signal::whole("nb", 1, b.net("nb", 1));
    lib.place_not(b, root, &s[0], &na);
    lib.place_not(b, root, &s[1], &nb);
    lib.place_nand(b, root, &na, &nb, &s[2]);
    f.finish(root)
}

/// `HalfAdder`: sum from an `Xor`, carry from an `And`.
pub fn half_adder_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.half_adder, &[("a", 1), ("b", 1)], &[("s", 1), ("c", 1)]);
    let b = &mut f.builder;
    lib.place_xor(b, root, &s[0], &s[1], &s[2]);
    lib.place_and(b, root, &s[0], &s[1], &s[3]);
    f.finish(root)
}

/// `And2`: one `And` per bit of two 2-bit buses.
pub fn and2_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.and2, &[("a", 2), ("b", 2)], &[("out", 2)]);
    let b = &mut f.builder;
    for bit in 0..2 {
        lib.place_and(
            b,
            root,
            &s[0].slice(bit, bit + 1),
            &s[1].slice(bit, bit + 1),
            &s[2].slice(bit, bit + 1),
        );
    }
    f.finish(root)
}

/// `Split4`: the halves of a 4-bit input each feed a `Buf2`.
pub fn split4_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.split4, &[("in", 4)], &[("lo", 2), ("hi", 2)]);
    let b = &mut f.builder;
    lib.place_buf2(b, root, &s[0].slice(0, 2), &s[1]);
    lib.place_buf2(b, root, &s[0].slice(2, 4), &s[2]);
    f.finish(root)
}

/// `Join4`: two `Buf2`s each drive one half of a 4-bit output.
pub fn join4_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.join4, &[("lo", 2), ("hi", 2)], &[("out", 4)]);
    let b = &mut f.builder;
    lib.place_buf2(b, root, &s[0], &s[2].slice(0, 2));
    lib.place_buf2(b, root, &s[1], &s[2].slice(2, 4));
    f.finish(root)
}

/// `Preset`: a `Reg8` whose input is tied to the 8-bit constant 5.
pub fn preset_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.preset, &[], &[("q", 8)]);
    let b = &mut f.builder;
    let five = Signal {
        wire: Wire::constant(8, 5),
        net: b.net_with_signal("const_5", 8, 5),
        range: BitRange::full(8),
    };
    lib.primitive(b, root, lib.reg8, &[("d", &five)], ("q", &s[0]));
    f.finish(root)
}

/// `Seeded`: a `Hold` whose input is tied to the 8-bit constant 5.
pub fn seeded_design() -> Design {
    let mut f = Fixture::new();
    let lib = f.lib;
    let (root, s) = f.root(lib.seeded, &[], &[("q", 8)]);
    let b = &mut f.builder;
    let five = Signal {
        wire: Wire::constant(8, 5),
        net: b.net_with_signal("const_5", 8, 5),
        range: BitRange::full(8),
    };
    lib.place_hold(b, root, &five, &s[0]);
    f.finish(root)
}

/// Parses a configuration, panicking on invalid input.
pub fn config(text: &str) -> SketchConfig {
    match gatesketch_config::load_config_from_str(text) {
        Ok(config) => config,
        Err(e) => panic!("invalid test config: {e}"),
    }
}
