//! Facade exercise
//!
//! A low level device network needs a lock/act/unlock dance for every
//! operation. The high level facade hides that behind three calls.

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    DeviceController,
    Core,
    Gte,
    Pch,
    Pmc,
}

#[derive(Debug, Clone)]
struct DeviceNode {
    name: &'static str,
    idcode: u32,
    device_type: DeviceType,
    visible: bool,
}

impl DeviceNode {
    fn new(name: &'static str, idcode: u32, device_type: DeviceType, visible: bool) -> Self {
        Self {
            name,
            idcode,
            device_type,
            visible,
        }
    }
}

#[derive(Debug)]
struct DeviceChain {
    nodes: Vec<DeviceNode>,
    locked: bool,
}

impl DeviceChain {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            locked: false,
        }
    }

    /// The device controller always sits at the front of the chain
    fn add_node(&mut self, node: DeviceNode) {
        if !self.nodes.is_empty() && node.device_type == DeviceType::DeviceController {
            self.nodes.insert(0, node);
        } else {
            self.nodes.push(node);
        }
    }

    fn reset_visibility(&mut self) {
        for node in &mut self.nodes {
            if node.device_type != DeviceType::DeviceController {
                node.visible = false;
            }
        }
    }

    /// Bit 0 of the mask is the controller, which is always selected
    fn select_nodes(&mut self, select_mask: u32) {
        for (index, node) in self.nodes.iter_mut().enumerate().skip(1).take(31) {
            if select_mask & (1 << index) != 0 {
                log::trace!("device {} selected", node.name);
                node.visible = true;
            }
        }
    }

    fn visible_idcodes(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .filter(|node| node.visible)
            .map(|node| node.idcode)
            .collect()
    }
}

/// Fine grained access to the device chains
pub trait DeviceNetworkLowLevel {
    fn num_chains(&self) -> usize;
    fn lock_device_chain(&mut self, chain: usize) -> bool;
    fn unlock_device_chain(&mut self, chain: usize) -> bool;
    fn reset_device_chain(&mut self, chain: usize);
    fn enable_devices_in_device_chain(&mut self, chain: usize, select_mask: u32);
    fn get_idcodes(&self, chain: usize) -> Vec<u32>;
}

/// Two device chains, each headed by a device controller
pub struct ComplicatedSubsystem {
    chains: Vec<DeviceChain>,
}

impl Default for ComplicatedSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplicatedSubsystem {
    pub fn new() -> Self {
        let mut chain0 = DeviceChain::new();
        chain0.add_node(DeviceNode::new("DDD_DEVCTRL0", 0x10101010, DeviceType::DeviceController, true));
        chain0.add_node(DeviceNode::new("DDD_CORE0", 0x20202020, DeviceType::Core, false));
        chain0.add_node(DeviceNode::new("DDD_GTE0", 0x30303030, DeviceType::Gte, false));

        let mut chain1 = DeviceChain::new();
        chain1.add_node(DeviceNode::new("DDD_DEVCTRL1", 0x10101011, DeviceType::DeviceController, true));
        chain1.add_node(DeviceNode::new("DDD_PCH0", 0x40404040, DeviceType::Pch, false));
        chain1.add_node(DeviceNode::new("DDD_PMC0", 0x50505050, DeviceType::Pmc, false));

        Self {
            chains: vec![chain0, chain1],
        }
    }
}

impl DeviceNetworkLowLevel for ComplicatedSubsystem {
    fn num_chains(&self) -> usize {
        self.chains.len()
    }

    fn lock_device_chain(&mut self, chain: usize) -> bool {
        match self.chains.get_mut(chain) {
            Some(c) if !c.locked => {
                c.locked = true;
                true
            }
            _ => false,
        }
    }

    fn unlock_device_chain(&mut self, chain: usize) -> bool {
        match self.chains.get_mut(chain) {
            Some(c) if c.locked => {
                c.locked = false;
                true
            }
            _ => false,
        }
    }

    fn reset_device_chain(&mut self, chain: usize) {
        if let Some(c) = self.chains.get_mut(chain) {
            c.reset_visibility();
        }
    }

    fn enable_devices_in_device_chain(&mut self, chain: usize, select_mask: u32) {
        if let Some(c) = self.chains.get_mut(chain) {
            c.select_nodes(select_mask);
        }
    }

    fn get_idcodes(&self, chain: usize) -> Vec<u32> {
        self.chains
            .get(chain)
            .map(DeviceChain::visible_idcodes)
            .unwrap_or_default()
    }
}

/// Simplified view over any low level network
pub struct DeviceNetworkHighLevel<N: DeviceNetworkLowLevel> {
    network: N,
}

impl<N: DeviceNetworkLowLevel> DeviceNetworkHighLevel<N> {
    pub fn new(network: N) -> Self {
        Self { network }
    }

    pub fn num_chains(&self) -> usize {
        self.network.num_chains()
    }

    /// Run `op` with the chain locked; does nothing if the lock is refused
    fn locked<T: Default>(&mut self, chain: usize, op: impl FnOnce(&mut N) -> T) -> T {
        if !self.network.lock_device_chain(chain) {
            log::debug!("device chain {} could not be locked", chain);
            return T::default();
        }
        let result = op(&mut self.network);
        self.network.unlock_device_chain(chain);
        result
    }

    pub fn get_idcodes(&mut self, chain: usize) -> Vec<u32> {
        self.locked(chain, |n| n.get_idcodes(chain))
    }

    pub fn enable_devices_in_device_chain(&mut self, chain: usize, select_mask: u32) {
        self.locked(chain, |n| n.enable_devices_in_device_chain(chain, select_mask))
    }

    pub fn disable_devices_in_device_chain(&mut self, chain: usize) {
        self.locked(chain, |n| n.reset_device_chain(chain))
    }
}

fn show_idcodes(chain: usize, idcodes: &[u32], out: &mut Transcript) {
    out.text(&format!("    On chain {}, idcodes = [ ", chain));
    for idcode in idcodes {
        out.text(&format!("0x{:X} ", idcode));
    }
    out.line("]");
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut facade = DeviceNetworkHighLevel::new(ComplicatedSubsystem::new());
    let num_chains = facade.num_chains();

    out.line("  Showing idcodes of devices after a device reset (expect one device on each chain)...");
    for chain in 0..num_chains {
        facade.disable_devices_in_device_chain(chain);
        let idcodes = facade.get_idcodes(chain);
        show_idcodes(chain, &idcodes, out);
    }

    out.line("  Showing idcodes of devices after selecting all devices...");
    for chain in 0..num_chains {
        facade.enable_devices_in_device_chain(chain, 0xffff_ffff);
        let idcodes = facade.get_idcodes(chain);
        show_idcodes(chain, &idcodes, out);
    }
    Ok(())
}
